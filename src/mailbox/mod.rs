//! Read-only access to the headers of a local mail store.

mod maildir;
mod mbox;
mod mh;

use crate::error::{Error, Result};
use crate::message::HeaderBlock;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use self::maildir::Maildir;
pub use self::mbox::Mbox;
pub use self::mh::Mh;

/// A mail store which can list the headers of every message it holds.
pub trait Mailbox {
    /// Reads the header block of every message, advancing `progress` as it
    /// goes.
    fn read_headers(&self, progress: &ProgressBar) -> Result<Vec<HeaderBlock>>;
}

/// On-disk layout of a mail store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxKind {
    /// One file per message under `new` and `cur`.
    Maildir,
    /// One numbered file per message, with a `.mh_sequences` file.
    Mh,
    /// Every message in a single mbox file.
    SingleFile,
}

impl MailboxKind {
    /// Probes the filesystem to tell which layout `path` uses.
    pub fn detect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SourceNotFound {
                what: "Sent mailbox",
                path: path.to_owned(),
            });
        }
        let kind = if path.join("new").is_dir() {
            MailboxKind::Maildir
        } else if path.join(".mh_sequences").exists() {
            MailboxKind::Mh
        } else if path.is_file() {
            MailboxKind::SingleFile
        } else {
            return Err(Error::UnknownMailboxFormat(path.to_owned()));
        };
        debug!(?kind, path = %path.display(), "detected mailbox format");
        Ok(kind)
    }

    pub fn open(self, path: &Path) -> Box<dyn Mailbox> {
        let path = path.to_owned();
        match self {
            MailboxKind::Maildir => Box::new(Maildir::new(path)),
            MailboxKind::Mh => Box::new(Mh::new(path)),
            MailboxKind::SingleFile => Box::new(Mbox::new(path)),
        }
    }
}

/// Opens the mail store at `path`, whatever its layout.
pub fn open(path: &Path) -> Result<Box<dyn Mailbox>> {
    Ok(MailboxKind::detect(path)?.open(path))
}

/// Reads the headers of one-message-per-file stores in parallel.
fn read_message_files(files: Vec<PathBuf>, progress: &ProgressBar) -> Result<Vec<HeaderBlock>> {
    // There is no email, just return.
    if files.is_empty() {
        return Ok(vec![]);
    }

    progress.set_length(files.len() as u64);
    let result = files
        .into_par_iter()
        .enumerate()
        .map(|(i, path)| -> Result<HeaderBlock> {
            let file = File::open(&path).map_err(Error::io(&path))?;
            let headers = HeaderBlock::read(BufReader::new(file)).map_err(Error::io(&path))?;
            if i % 128 == 127 {
                progress.inc(128);
            }
            Ok(headers)
        })
        .collect();
    progress.finish_and_clear();
    result
}
