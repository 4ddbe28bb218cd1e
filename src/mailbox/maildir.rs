use super::{read_message_files, Mailbox};
use crate::error::Result;
use crate::message::HeaderBlock;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::warn;

/// Maildir layout. Messages in `tmp` are still being delivered and are not
/// read.
pub struct Maildir {
    inner: ::maildir::Maildir,
}

impl Maildir {
    pub fn new(path: PathBuf) -> Self {
        Maildir {
            inner: ::maildir::Maildir::from(path),
        }
    }

    /// Message files under `new` and `cur`. Entries which are not maildir
    /// messages are skipped.
    fn list_messages(&self) -> Vec<PathBuf> {
        self.inner
            .list_new()
            .chain(self.inner.list_cur())
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path().to_owned()),
                Err(err) => {
                    warn!(maildir = %self.inner.path().display(), %err, "skipping maildir entry");
                    None
                }
            })
            .collect()
    }
}

impl Mailbox for Maildir {
    fn read_headers(&self, progress: &ProgressBar) -> Result<Vec<HeaderBlock>> {
        read_message_files(self.list_messages(), progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailparse::MailHeaderMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_headers() {
        let dir = TempDir::new().unwrap();
        for sub in &["new", "cur", "tmp"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        fs::write(dir.path().join("new/1.host"), "To: a@example.com\n\nbody\n").unwrap();
        fs::write(dir.path().join("cur/2.host:2,S"), "To: b@example.com\n").unwrap();
        fs::write(dir.path().join("tmp/3.host"), "To: d@example.com\n").unwrap();

        let maildir = Maildir::new(dir.path().to_owned());
        let mut to: Vec<_> = maildir
            .read_headers(&ProgressBar::hidden())
            .unwrap()
            .iter()
            .filter_map(|block| block.parse().unwrap().get_first_value("to"))
            .collect();
        to.sort();
        assert_eq!(to, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_without_cur() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("new")).unwrap();
        let maildir = Maildir::new(dir.path().to_owned());
        assert!(maildir.read_headers(&ProgressBar::hidden()).unwrap().is_empty());
    }
}
