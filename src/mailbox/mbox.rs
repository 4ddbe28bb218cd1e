use super::Mailbox;
use crate::error::{Error, Result};
use crate::message::HeaderBlock;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Separator line starting every message of an mbox file.
const FROM_LINE: &[u8] = b"From ";

/// Single file mbox. Every line starting with `From ` opens a new message.
pub struct Mbox {
    path: PathBuf,
}

impl Mbox {
    pub fn new(path: PathBuf) -> Self {
        Mbox { path }
    }
}

impl Mailbox for Mbox {
    fn read_headers(&self, progress: &ProgressBar) -> Result<Vec<HeaderBlock>> {
        let file = File::open(&self.path).map_err(Error::io(&self.path))?;
        if let Ok(metadata) = file.metadata() {
            progress.set_length(metadata.len());
        }
        let mut reader = BufReader::new(file);

        let mut messages = vec![];
        // Header block of the current message, while still being read.
        let mut current: Option<HeaderBlock> = None;
        let mut buf = vec![];
        loop {
            buf.clear();
            let len = reader
                .read_until(b'\n', &mut buf)
                .map_err(Error::io(&self.path))?;
            if len == 0 {
                break;
            }
            progress.inc(len as u64);

            if buf.starts_with(FROM_LINE) {
                messages.extend(current.replace(HeaderBlock::default()));
            } else if let Some(block) = current.as_mut() {
                if !block.push_line(&buf) {
                    messages.extend(current.take());
                }
            }
        }
        messages.extend(current);
        progress.finish_and_clear();
        Ok(messages)
    }
}
