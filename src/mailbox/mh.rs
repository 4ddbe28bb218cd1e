use super::{read_message_files, Mailbox};
use crate::error::{Error, Result};
use crate::message::HeaderBlock;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

/// MH folder: every message is a file named by its number.
pub struct Mh {
    path: PathBuf,
}

impl Mh {
    pub fn new(path: PathBuf) -> Self {
        Mh { path }
    }

    fn list_messages(&self) -> Result<Vec<PathBuf>> {
        let mut numbered = vec![];
        for entry in fs::read_dir(&self.path).map_err(Error::io(&self.path))? {
            let path = entry.map_err(Error::io(&self.path))?.path();
            let number = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.parse::<u64>().ok());
            if let Some(number) = number {
                if path.is_file() {
                    numbered.push((number, path));
                }
            }
        }
        numbered.sort();
        Ok(numbered.into_iter().map(|(_, path)| path).collect())
    }
}

impl Mailbox for Mh {
    fn read_headers(&self, progress: &ProgressBar) -> Result<Vec<HeaderBlock>> {
        read_message_files(self.list_messages()?, progress)
    }
}
