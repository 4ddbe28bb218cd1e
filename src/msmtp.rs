//! Sent mail dates out of an msmtp log file.
//!
//! msmtp appends one line per delivery attempt, e.g.
//!
//! ```text
//! Feb 09 12:00:00 host=smtp.gmail.com tls=on auth=on user=me from=me@example.org
//!   recipients=joe@example.com,max@example.com mailsize=512 smtpstatus=250
//!   smtpmsg='250 2.0.0 OK 950097600 a1sm1234567wrb.12' exitcode=EX_OK
//! ```
//!
//! (wrapped here, a single line in the log). The line prefix has no year, so
//! it is inferred by walking the log backwards from its modification time.
//! Gmail replies carry a Unix timestamp, which gives an exact date instead.

use crate::correspondence::{AddressFilter, Correspondence};
use crate::datetime::parse_month_day;
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Suffix of lines recording a successful delivery.
const SUCCESS_MARKER: &str = "exitcode=EX_OK";
const RECIPIENTS_FIELD: &str = "recipients=";
const SMTP_MESSAGE_FIELD: &str = "smtpmsg";

/// A successful delivery line and its 1-based line number.
struct Delivery {
    number: usize,
    text: String,
}

/// Collects the last date mail was sent to each address from an msmtp log.
///
/// Only the first recipient of each delivery counts unless `all_recipients`
/// is set.
pub fn parse_msmtp(
    log: &Path,
    all_recipients: bool,
    filter: &AddressFilter,
    gmail: bool,
) -> Result<Correspondence> {
    if !log.exists() {
        return Err(Error::SourceNotFound {
            what: "msmtp sent log",
            path: log.to_owned(),
        });
    }
    let file = File::open(log).map_err(Error::io(log))?;
    let modified: DateTime<Utc> = file
        .metadata()
        .and_then(|metadata| metadata.modified())
        .map_err(Error::io(log))?
        .into();

    let mut deliveries = vec![];
    let mut reader = BufReader::new(file);
    let mut buf = vec![];
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(Error::io(log))? == 0 {
            break;
        }
        number += 1;
        let line = String::from_utf8_lossy(&buf);
        // A final line without a newline still counts.
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.ends_with(SUCCESS_MARKER) {
            deliveries.push(Delivery {
                number,
                text: line.to_string(),
            });
        }
    }
    debug!(
        lines = number,
        deliveries = deliveries.len(),
        anchor = %modified,
        "read msmtp log"
    );

    let parser = LogParser {
        log,
        all_recipients,
        filter,
        gmail,
    };
    parser.parse(&deliveries, modified.date_naive())
}

struct LogParser<'a> {
    log: &'a Path,
    all_recipients: bool,
    filter: &'a AddressFilter,
    gmail: bool,
}

impl LogParser<'_> {
    /// Walks the deliveries newest first. `anchor` is the date the log was
    /// last written.
    fn parse(&self, deliveries: &[Delivery], anchor: NaiveDate) -> Result<Correspondence> {
        let mut years = YearInference::new(anchor);
        let mut result = Correspondence::new();
        for delivery in deliveries.iter().rev() {
            let line = delivery.text.as_str();
            let date = if self.gmail {
                gmail_date(line).ok_or_else(|| Error::NotGmailFormat(self.log.to_owned()))?
            } else {
                let (month, day) = parse_month_day(line.as_bytes())
                    .ok_or_else(|| self.malformed(delivery, "no month and day at line start"))?;
                years
                    .date_for(month, day)
                    .ok_or_else(|| self.malformed(delivery, "date not valid in inferred year"))?
            };

            let recipients =
                recipients(line).ok_or_else(|| self.malformed(delivery, "no recipients field"))?;
            let take = if self.all_recipients { usize::MAX } else { 1 };
            for address in recipients
                .split(',')
                .map(str::to_lowercase)
                .filter(|address| !address.is_empty())
                .take(take)
            {
                if self.filter.accepts(&address) {
                    result.record(address, date);
                }
            }
        }
        Ok(result)
    }

    fn malformed(&self, delivery: &Delivery, reason: &'static str) -> Error {
        Error::MalformedLogLine {
            path: self.log.to_owned(),
            line: delivery.number,
            reason,
        }
    }
}

/// Year tracking for log lines which only carry a month and a day.
///
/// Lines are fed newest first. Whenever a line's (month, day) is later in the
/// calendar than the one before it, the log crossed a new year going
/// backwards. The anchor itself is the first baseline, so a line dated on the
/// anchor day stays in the anchor's year.
struct YearInference {
    year: i32,
    baseline: (u32, u32),
}

impl YearInference {
    fn new(anchor: NaiveDate) -> Self {
        YearInference {
            year: anchor.year(),
            baseline: (anchor.month(), anchor.day()),
        }
    }

    fn date_for(&mut self, month: u32, day: u32) -> Option<NaiveDate> {
        if (month, day) > self.baseline {
            self.year -= 1;
        }
        self.baseline = (month, day);
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

/// Value of the `recipients=` field, up to the next whitespace.
fn recipients(line: &str) -> Option<&str> {
    let start = line.find(RECIPIENTS_FIELD)? + RECIPIENTS_FIELD.len();
    let value = &line[start..];
    let end = value.find(char::is_whitespace).unwrap_or(value.len());
    Some(&value[..end])
}

/// Date of the Unix timestamp following the last `OK ` of the server reply.
fn gmail_date(line: &str) -> Option<NaiveDate> {
    let message = &line[line.find(SMTP_MESSAGE_FIELD)?..];
    let value = &message[message.rfind("OK ")? + 3..];
    let token = value
        .split(char::is_whitespace)
        .next()?
        .trim_end_matches('\'');
    let timestamp = token.parse().ok()?;
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}
