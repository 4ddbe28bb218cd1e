use crate::config::SentType;
use chrono::NaiveDate;
use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "blanco")]
#[clap(version, about)]
#[clap(after_help = "Unset options fall back to the configuration file.")]
pub struct Args {
    /// Address book to read contacts from.
    #[clap(short, long, value_name = "FILENAME")]
    pub addressbook: Option<PathBuf>,
    /// Sent source type.
    #[clap(short = 't', long, value_enum)]
    pub sent_type: Option<SentType>,
    /// Include all recipients (CC and BCC fields).
    #[clap(short = 'r', long, overrides_with = "no_all")]
    pub all: bool,
    /// Include only the first recipient (TO field).
    #[clap(long, overrides_with = "all")]
    pub no_all: bool,
    /// Mailbox used to store sent mail.
    #[clap(short, long, value_name = "PATH")]
    pub mbox: Option<PathBuf>,
    /// msmtp log to parse.
    #[clap(short, long, value_name = "FILENAME")]
    pub log: Option<PathBuf>,
    /// Log from a gmail account (use accurate filter).
    #[clap(short, long, overrides_with = "no_gmail")]
    pub gmail: bool,
    /// msmtp log for a non-gmail account.
    #[clap(long, overrides_with = "gmail")]
    pub no_gmail: bool,
    /// Address book field to use for frequency value.
    #[clap(short = 's', long, value_name = "NAME")]
    pub field: Option<String>,
    /// Display reminders using notification popups.
    #[clap(short, long, overrides_with = "no_notify")]
    pub notify: bool,
    /// Display reminders on standard error.
    #[clap(long, overrides_with = "notify")]
    pub no_notify: bool,
    /// Output colourised informational text.
    #[clap(
        long,
        env = "BLANCO_COLOUR",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub colour: Option<bool>,
    /// Output plain text.
    #[clap(long)]
    pub no_colour: bool,
    /// Produce verbose output.
    #[clap(short, long, overrides_with = "no_verbose")]
    pub verbose: bool,
    #[clap(long, overrides_with = "verbose", hide = true)]
    pub no_verbose: bool,
    /// Suppress any progress output if set.
    #[clap(short, long)]
    pub quiet: bool,
    /// Configuration file to read instead of the default one.
    #[clap(short, long, value_name = "FILENAME")]
    pub config: Option<PathBuf>,
    /// Check reminders as of this date instead of today.
    #[clap(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

/// Collapses a `--flag` / `--no-flag` pair. `None` when neither was given.
fn switch(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn all(&self) -> Option<bool> {
        switch(self.all, self.no_all)
    }

    pub fn gmail(&self) -> Option<bool> {
        switch(self.gmail, self.no_gmail)
    }

    pub fn notify(&self) -> Option<bool> {
        switch(self.notify, self.no_notify)
    }

    pub fn verbose(&self) -> Option<bool> {
        switch(self.verbose, self.no_verbose)
    }

    pub fn colour(&self) -> Option<bool> {
        if self.no_colour {
            Some(false)
        } else {
            self.colour
        }
    }
}
