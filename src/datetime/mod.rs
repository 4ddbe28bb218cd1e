mod parser;

use chrono::NaiveDate;
use combine::Parser;

/// Calendar date of a `Date:` header value, loosely following RFC 5322
/// section 3.3.
///
/// The date is taken as written by the sender. Time of day and zone are
/// skipped without converting to UTC, so a message sent late in the evening
/// keeps the sender's date. Beyond `DateTime::parse_from_rfc2822` this
/// accepts:
/// * single digit hour / minute / second,
/// * comments,
/// * a day of week which doesn't match the date,
/// * any alphabetic zone name, or no zone or time of day at all.
///
/// Whitespace, tab, carriage return, and newline are handled the same way.
/// Only a complete value is accepted.
pub fn parse_date(s: &[u8]) -> Option<NaiveDate> {
    match parser::date_time().parse(s) {
        Ok((date, b"")) => Some(date),
        _ => None,
    }
}

/// Parses the `Mon DD` prefix of a syslog style line. Anything after the day
/// is ignored.
pub fn parse_month_day(s: &[u8]) -> Option<(u32, u32)> {
    parser::month_day().parse(s).ok().map(|(md, _)| md)
}
