use crate::address::extract_addresses;
use crate::correspondence::{AddressFilter, Correspondence};
use crate::datetime::parse_date;
use crate::error::Result;
use crate::mailbox;
use crate::message::HeaderBlock;
use chrono::NaiveDate;
use indicatif::ProgressBar;
use mailparse::MailHeaderMap;
use std::path::Path;
use tracing::{debug, warn};

/// Collects the last date mail was sent to each address from a sent
/// mailbox.
///
/// Only `To` is considered unless `all_recipients` is set, in which case
/// `Cc` and `Bcc` count as well.
pub fn parse_sent(
    path: &Path,
    all_recipients: bool,
    filter: &AddressFilter,
    progress: &ProgressBar,
) -> Result<Correspondence> {
    let messages = mailbox::open(path)?.read_headers(progress)?;
    debug!(count = messages.len(), "read sent messages");
    let mut result = Correspondence::new();
    for block in &messages {
        result.extend(sent_to(block, all_recipients, filter));
    }
    Ok(result)
}

fn sent_to(
    block: &HeaderBlock,
    all_recipients: bool,
    filter: &AddressFilter,
) -> Vec<(String, NaiveDate)> {
    let headers = match block.parse() {
        Ok(headers) => headers,
        Err(err) => {
            warn!(%err, "skipping message with unreadable headers");
            return vec![];
        }
    };
    let date_header = headers.get_first_value("Date");
    let date = match date_header.as_deref().and_then(|d| parse_date(d.as_bytes())) {
        Some(date) => date,
        None => {
            let to = headers.get_first_value("To");
            warn!(
                date = date_header.as_deref().unwrap_or_default(),
                to = to.as_deref().unwrap_or_default(),
                "skipping message without a usable Date header"
            );
            return vec![];
        }
    };
    let fields: &[&str] = if all_recipients {
        &["To", "Cc", "Bcc"]
    } else {
        &["To"]
    };
    fields
        .iter()
        .flat_map(|&field| headers.get_all_values(field))
        .flat_map(|value| extract_addresses(&value))
        .filter(|address| filter.accepts(address))
        .map(|address| (address, date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    fn data(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join(name)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sent(name: &str, all: bool, addresses: &[&str]) -> Vec<(String, NaiveDate)> {
        let filter = AddressFilter::new(addresses);
        let result = parse_sent(&data(name), all, &filter, &ProgressBar::hidden()).unwrap();
        let mut result: Vec<_> = result.iter().map(|(a, d)| (a.to_string(), d)).collect();
        result.sort();
        result
    }

    fn expected(entries: &[(&str, NaiveDate)]) -> Vec<(String, NaiveDate)> {
        let mut result: Vec<_> = entries.iter().map(|(a, d)| (a.to_string(), *d)).collect();
        result.sort();
        result
    }

    #[test]
    fn test_maildir_all_recipients() {
        let old = date(2000, 2, 9);
        assert_eq!(
            sent("sent.maildir", true, &[]),
            expected(&[
                ("joe@example.com", old),
                ("max@example.com", old),
                ("nobody@example.com", old),
                ("someone@example.net", date(2010, 2, 9)),
                ("steven@example.com", old),
                // Seen in To in 2000 and in Cc in 2010.
                ("test@example.com", date(2010, 2, 9)),
            ])
        );
    }

    #[test]
    fn test_maildir_to_only() {
        let old = date(2000, 2, 9);
        assert_eq!(
            sent("sent.maildir", false, &[]),
            expected(&[
                ("joe@example.com", old),
                ("nobody@example.com", old),
                ("someone@example.net", date(2010, 2, 9)),
                ("test@example.com", old),
            ])
        );
    }

    #[test]
    fn test_mh() {
        assert_eq!(
            sent("sent.mh", false, &[]),
            expected(&[
                ("joe@example.com", date(2000, 2, 9)),
                ("nobody@example.com", date(2010, 2, 9)),
            ])
        );
    }

    #[test]
    fn test_mbox_restricted() {
        assert_eq!(
            sent("sent.mbox", false, &["joe@example.com"]),
            expected(&[("joe@example.com", date(2000, 2, 9))])
        );
        assert_eq!(
            sent("sent.mbox", true, &["joe@example.com"]),
            expected(&[("joe@example.com", date(2010, 2, 9))])
        );
    }

    fn block(text: &str) -> HeaderBlock {
        HeaderBlock::read(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_missing_date_is_skipped() {
        let everyone = AddressFilter::default();
        assert!(sent_to(&block("To: joe@example.com\n"), true, &everyone).is_empty());
        assert!(
            sent_to(&block("To: joe@example.com\nDate: someday\n"), true, &everyone).is_empty()
        );
    }

    #[test]
    fn test_date_zone_is_ignored() {
        let everyone = AddressFilter::default();
        for value in [
            "Wed, 09 Feb 2000 12:00:00 CET",
            "Wed, 09 Feb 2000 12:00:00",
            "Wed, 09 Feb 2000 12:00:00 +0000 (UTC)",
            "Wed, 09 Feb 2000 23:30:00 -0800",
        ] {
            let headers = block(&format!("To: joe@example.com\nDate: {}\n", value));
            assert_eq!(
                sent_to(&headers, false, &everyone),
                vec![("joe@example.com".to_string(), date(2000, 2, 9))],
                "{}",
                value
            );
        }
    }

    #[test]
    fn test_missing_mailbox() {
        let result = parse_sent(
            &data("no-such-mailbox"),
            false,
            &AddressFilter::default(),
            &ProgressBar::hidden(),
        );
        assert!(matches!(result, Err(Error::SourceNotFound { .. })));
    }
}
