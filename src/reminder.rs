use crate::contact::{Contact, Roster};
use crate::correspondence::Correspondence;
use chrono::NaiveDate;

/// Outcome of checking one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No mail to any of the contact's addresses was found.
    NoRecord,
    /// `today` is past the trigger date.
    Due { trigger: NaiveDate },
    /// Mail was sent recently enough, no reminder until after `trigger`.
    NotDue { trigger: NaiveDate },
}

pub fn classify_contact(contact: &Contact, sent: &Correspondence, today: NaiveDate) -> Verdict {
    match contact.trigger(sent) {
        None => Verdict::NoRecord,
        Some(trigger) if today > trigger => Verdict::Due { trigger },
        Some(trigger) => Verdict::NotDue { trigger },
    }
}

/// Classifies every contact of the roster as of `today`.
pub fn classify<'a>(
    roster: &'a Roster,
    sent: &Correspondence,
    today: NaiveDate,
) -> Vec<(&'a Contact, Verdict)> {
    roster
        .iter()
        .map(|contact| (contact, classify_contact(contact, sent, today)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sent(entries: &[(&str, NaiveDate)]) -> Correspondence {
        entries.iter().map(|(a, d)| (a.to_string(), *d)).collect()
    }

    #[test]
    fn test_joe() {
        let joe = Contact::new("Joe", &["joe@example.com"], 30);
        let sent = sent(&[("joe@example.com", date(2000, 2, 9))]);
        let trigger = date(2000, 3, 10);
        assert_eq!(
            classify_contact(&joe, &sent, date(2000, 3, 15)),
            Verdict::Due { trigger }
        );
        assert_eq!(
            classify_contact(&joe, &sent, date(2000, 3, 1)),
            Verdict::NotDue { trigger }
        );
        // Due only once the trigger date has passed.
        assert_eq!(
            classify_contact(&joe, &sent, trigger),
            Verdict::NotDue { trigger }
        );
        assert_eq!(
            classify_contact(&joe, &sent, date(2000, 3, 11)),
            Verdict::Due { trigger }
        );
    }

    #[test]
    fn test_no_record() {
        let bill = Contact::new("Bill", &["test@example.com"], 30);
        let sent = sent(&[("joe@example.com", date(2000, 2, 9))]);
        assert_eq!(
            classify_contact(&bill, &sent, date(2000, 3, 15)),
            Verdict::NoRecord
        );
    }

    #[test]
    fn test_latest_address_counts() {
        let max = Contact::new("Max", &["max@example.com", "maxwell@example.org"], 14);
        let sent = sent(&[
            ("max@example.com", date(2000, 1, 1)),
            ("maxwell@example.org", date(2000, 3, 1)),
        ]);
        assert_eq!(
            classify_contact(&max, &sent, date(2000, 3, 10)),
            Verdict::NotDue {
                trigger: date(2000, 3, 15)
            }
        );
    }

    #[test]
    fn test_classify_roster() {
        let roster = Roster::new(vec![
            Contact::new("Bill", &["test@example.com"], 30),
            Contact::new("Joe", &["joe@example.com"], 30),
            Contact::new("Steven", &["steven@example.com"], 365),
        ]);
        let sent = sent(&[
            ("joe@example.com", date(2000, 2, 9)),
            ("steven@example.com", date(2000, 2, 9)),
        ]);
        let verdicts: Vec<_> = classify(&roster, &sent, date(2000, 3, 15))
            .into_iter()
            .map(|(contact, verdict)| (contact.name.as_str(), verdict))
            .collect();
        assert_eq!(
            verdicts,
            vec![
                ("Bill", Verdict::NoRecord),
                (
                    "Joe",
                    Verdict::Due {
                        trigger: date(2000, 3, 10)
                    }
                ),
                (
                    "Steven",
                    Verdict::NotDue {
                        trigger: date(2001, 2, 8)
                    }
                ),
            ]
        );
    }
}
