use crate::args::Args;
use anyhow::{anyhow, bail, Context};
use clap::ValueEnum;
use ini::{Ini, ParseOption, Properties};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Section of the configuration file holding the settings.
const SECTION: &str = "blanco";

/// Where sent mail is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SentType {
    /// A maildir, MH folder or mbox file.
    Mailbox,
    /// An msmtp log file.
    Msmtp,
}

/// Settings of one run: the configuration file with command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addressbook: PathBuf,
    pub sent_type: SentType,
    pub all: bool,
    pub mbox: PathBuf,
    pub log: PathBuf,
    pub gmail: bool,
    pub field: String,
    pub notify: bool,
    /// `None` picks colour when stderr is a terminal.
    pub colour: Option<bool>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addressbook: expand_home("~/.abook/addressbook"),
            sent_type: SentType::Mailbox,
            all: false,
            mbox: expand_home("~/.sup/sent.mbox"),
            log: expand_home("~/Mail/.logs/gmail.log"),
            gmail: false,
            field: "custom4".to_string(),
            notify: false,
            colour: None,
            verbose: false,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/blanco/config.ini` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("blanco").join("config.ini"))
    }

    /// Reads the configuration file. An explicit `path` must exist, the
    /// default one may be missing.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_owned(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };
        if !path.is_file() {
            if required {
                bail!("Configuration file `{}' not found", path.display());
            }
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let ini = read_ini(&path)
            .with_context(|| format!("Failed to read `{}'", path.display()))?;
        Self::from_ini(&ini)
            .with_context(|| format!("Invalid configuration file `{}'", path.display()))
    }

    pub fn from_ini(ini: &Ini) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let section = match ini.section(Some(SECTION)) {
            Some(section) => section,
            None => return Ok(config),
        };
        if let Some(value) = property(section, "addressbook") {
            config.addressbook = expand_home(value);
        }
        if let Some(value) = property(section, "sent type") {
            config.sent_type = SentType::from_str(value, true)
                .map_err(|_| anyhow!("Config value for `sent type' must be mailbox or msmtp"))?;
        }
        if let Some(value) = property(section, "mbox") {
            config.mbox = expand_home(value);
        }
        if let Some(value) = property(section, "log") {
            config.log = expand_home(value);
        }
        if let Some(value) = property(section, "field") {
            config.field = value.to_string();
        }
        config.all = get_bool(section, "all")?.unwrap_or(config.all);
        config.gmail = get_bool(section, "gmail")?.unwrap_or(config.gmail);
        config.notify = get_bool(section, "notify")?.unwrap_or(config.notify);
        config.verbose = get_bool(section, "verbose")?.unwrap_or(config.verbose);
        config.colour = match get_bool(section, "colour")? {
            Some(colour) => Some(colour),
            None => get_bool(section, "color")?,
        };
        Ok(config)
    }

    /// Overrides settings given on the command line.
    pub fn apply(&mut self, args: &Args) {
        if let Some(addressbook) = &args.addressbook {
            self.addressbook = addressbook.clone();
        }
        if let Some(sent_type) = args.sent_type {
            self.sent_type = sent_type;
        }
        if let Some(mbox) = &args.mbox {
            self.mbox = mbox.clone();
        }
        if let Some(log) = &args.log {
            self.log = log.clone();
        }
        if let Some(field) = &args.field {
            self.field = field.clone();
        }
        self.all = args.all().unwrap_or(self.all);
        self.gmail = args.gmail().unwrap_or(self.gmail);
        self.notify = args.notify().unwrap_or(self.notify);
        self.verbose = args.verbose().unwrap_or(self.verbose);
        self.colour = args.colour().or(self.colour);
    }
}

/// Reads an INI file, keeping backslashes as written.
pub fn read_ini(path: &Path) -> Result<Ini, ini::Error> {
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_file_opt(path, options)
}

/// Value of `key`, compared case-insensitively. A repeated key takes its
/// last value.
pub fn property<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .last()
        .map(|(_, v)| v)
}

fn get_bool(section: &Properties, key: &str) -> anyhow::Result<Option<bool>> {
    let value = match property(section, key) {
        Some(value) => value,
        None => return Ok(None),
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(Some(true)),
        "0" | "no" | "false" | "off" => Ok(Some(false)),
        _ => bail!("Config value for `{}' must be a bool", key),
    }
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_ini() {
        let ini = Ini::load_from_str(
            "[blanco]\n\
             addressbook = /tmp/addressbook\n\
             sent type = msmtp\n\
             all = yes\n\
             log = /var/log/msmtp.log\n\
             gmail = On\n\
             field = frequency\n\
             color = false\n",
        )
        .unwrap();
        let config = Config::from_ini(&ini).unwrap();
        assert_eq!(config.addressbook, PathBuf::from("/tmp/addressbook"));
        assert_eq!(config.sent_type, SentType::Msmtp);
        assert!(config.all);
        assert_eq!(config.log, PathBuf::from("/var/log/msmtp.log"));
        assert!(config.gmail);
        assert_eq!(config.field, "frequency");
        assert!(!config.notify);
        assert_eq!(config.colour, Some(false));
        assert_eq!(config.mbox, Config::default().mbox);
    }

    #[test]
    fn test_invalid_values() {
        let ini = Ini::load_from_str("[blanco]\nnotify = maybe\n").unwrap();
        let err = Config::from_ini(&ini).unwrap_err();
        assert_eq!(err.to_string(), "Config value for `notify' must be a bool");

        let ini = Ini::load_from_str("[blanco]\nsent type = imap\n").unwrap();
        assert!(Config::from_ini(&ini).is_err());
    }

    #[test]
    fn test_property() {
        let ini = Ini::load_from_str("[0]\nFrequency = 30d\nfield = custom4\nfield = frequency\n")
            .unwrap();
        let section = ini.section(Some("0")).unwrap();
        assert_eq!(property(section, "frequency"), Some("30d"));
        assert_eq!(property(section, "FIELD"), Some("frequency"));
        assert_eq!(property(section, "custom4"), None);
    }

    #[test]
    fn test_other_sections_ignored() {
        let ini = Ini::load_from_str("[other]\nall = maybe\n").unwrap();
        assert_eq!(Config::from_ini(&ini).unwrap(), Config::default());
    }

    #[test]
    fn test_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        assert!(Config::load(Some(&path)).is_err());

        fs::write(&path, "[blanco]\nverbose = 1\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert!(config.verbose);

        fs::write(&path, "[blanco]\nverbose = 2\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("must be a bool"));
    }

    #[test]
    fn test_apply() {
        let ini = Ini::load_from_str("[blanco]\nall = true\nnotify = true\nfield = custom4\n").unwrap();
        let mut config = Config::from_ini(&ini).unwrap();
        let args = Args::try_parse_from(["blanco", "--no-all", "-s", "frequency", "-t", "msmtp"])
            .unwrap();
        config.apply(&args);
        assert!(!config.all);
        assert!(config.notify);
        assert_eq!(config.field, "frequency");
        assert_eq!(config.sent_type, SentType::Msmtp);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.abook/addressbook"), home.join(".abook/addressbook"));
        }
    }
}
