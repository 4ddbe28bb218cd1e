//! Errors raised while reading the address book and the sent mail source.

use std::io;
use std::path::PathBuf;

/// Result type alias for the reminder core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the reminder core. Every one of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Mail store or transfer log does not exist.
    #[error("{what} `{}' not found", .path.display())]
    SourceNotFound { what: &'static str, path: PathBuf },

    /// Path exists but is neither a maildir, an MH folder nor an mbox file.
    #[error("Unknown mailbox format for `{}'", .0.display())]
    UnknownMailboxFormat(PathBuf),

    /// A gmail log was requested but a line carries no delivery timestamp.
    #[error("msmtp log `{}' is not in gmail format", .0.display())]
    NotGmailFormat(PathBuf),

    /// A successful delivery line without a usable date or recipient list.
    #[error("msmtp log `{}' line {line}: {reason}", .path.display())]
    MalformedLogLine {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },

    /// Frequency value which is not a duration.
    #[error("Invalid duration value `{0}'")]
    InvalidDuration(String),

    /// Address book is missing or not a regular file.
    #[error("Addressbook file not found `{}'", .0.display())]
    AddressbookNotFound(PathBuf),

    /// Address book which cannot be read or parsed.
    #[error("Failed to read addressbook `{}': {source}", .path.display())]
    Addressbook {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// Address book record with a frequency but no email address.
    #[error("Addressbook entry [{0}] has no email address")]
    MissingAddress(String),

    #[error("Failed to read `{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
