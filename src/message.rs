//! Raw header block of a message. Field parsing is left to `mailparse`.

use mailparse::{MailHeader, MailParseError};
use std::io::{self, BufRead};

/// Header lines of one message, up to the blank line ending them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    raw: Vec<u8>,
}

impl HeaderBlock {
    /// Reads the header block, leaving the body unread.
    pub fn read<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut block = HeaderBlock::default();
        let mut buf = vec![];
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 || !block.push_line(&buf) {
                break;
            }
        }
        Ok(block)
    }

    /// Appends one raw line. Returns false on the blank line which ends the
    /// block.
    pub fn push_line(&mut self, line: &[u8]) -> bool {
        if line == b"\n" || line == b"\r\n" {
            return false;
        }
        self.raw.extend_from_slice(line);
        if !line.ends_with(b"\n") {
            self.raw.push(b'\n');
        }
        true
    }

    pub fn parse(&self) -> Result<Vec<MailHeader<'_>>, MailParseError> {
        mailparse::parse_headers(&self.raw).map(|(headers, _)| headers)
    }
}
