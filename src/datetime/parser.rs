use chrono::NaiveDate;
use combine::{
    error::UnexpectedParse,
    parser::{
        byte::{bytes_cmp, digit, letter, spaces},
        choice::{choice, optional},
        combinator::attempt,
        range::recognize,
        repeat::{skip_many, skip_many1},
        token::{none_of, one_of, token},
    },
    Parser,
};

/// Calendar date of an RFC 5322 date-time. Day of week, time of day and
/// zone are accepted and dropped.
pub fn date_time<'a>() -> impl Parser<&'a [u8], Output = NaiveDate> {
    (
        optional(attempt((cfws(), skip_many1(letter()), cfws(), token(b',')))),
        date(),
        optional(time_of_day()),
        optional(zone()),
        cfws(),
    )
        .map(|(_, date, _, _, _)| date)
}

/// The `Mon DD` prefix msmtp writes at the start of every log line.
pub fn month_day<'a>() -> impl Parser<&'a [u8], Output = (u32, u32)> {
    (month(), skip_many(token(b' ')), digit(), optional(digit())).and_then(
        |(month, _, d1, d2)| {
            let day = match d2 {
                Some(d2) => atoi(d1) * 10 + atoi(d2),
                None => atoi(d1),
            };
            if (1..=31).contains(&day) {
                Ok((month, day))
            } else {
                Err(UnexpectedParse::Unexpected)
            }
        },
    )
}

macro_rules! choice_literal {
    ($($s:expr => $v:expr,)+) => {
        choice((
            $(attempt(bytes_cmp($s, |l: u8, r: u8| l.eq_ignore_ascii_case(&r))).map(|_| $v),)+
        ))
    }
}

fn date<'a>() -> impl Parser<&'a [u8], Output = NaiveDate> {
    (
        one_or_two_digits_with_cfws(), // day
        month(),
        year(),
    )
        .and_then(|(day, month, year)| {
            NaiveDate::from_ymd_opt(year, month, day).ok_or(UnexpectedParse::Unexpected)
        })
}

fn month<'a>() -> impl Parser<&'a [u8], Output = u32> {
    choice_literal! {
        b"jan" => 1,
        b"feb" => 2,
        b"mar" => 3,
        b"apr" => 4,
        b"may" => 5,
        b"jun" => 6,
        b"jul" => 7,
        b"aug" => 8,
        b"sep" => 9,
        b"oct" => 10,
        b"nov" => 11,
        b"dec" => 12,
    }
}

fn year<'a>() -> impl Parser<&'a [u8], Output = i32> {
    (
        optional(cfws()),
        recognize(skip_many1(digit())),
        optional(cfws()),
    )
        .and_then(|(_, s, _): (_, &[u8], _)| {
            if s.len() < 2 || s.len() > 4 {
                return Err(UnexpectedParse::Unexpected);
            }
            let mut year = s
                .iter()
                .fold(0, |year, digit| year * 10 + i32::from(digit - b'0'));
            match s.len() {
                2 if year < 50 => year += 2000,
                2 | 3 => year += 1900,
                _ => {}
            }
            Ok(year)
        })
}

/// `H:M[:S]`, single digits allowed. A leap second is fine.
fn time_of_day<'a>() -> impl Parser<&'a [u8], Output = ()> {
    (
        one_or_two_digits_with_cfws(), // hour
        token(b':'),
        one_or_two_digits_with_cfws(), // minute
        optional((
            token(b':'),
            one_or_two_digits_with_cfws(), // second
        )),
    )
        .and_then(|(hour, _, minute, second)| {
            let second = second.map_or(0, |(_, s)| s);
            if hour < 24 && minute < 60 && second <= 60 {
                Ok(())
            } else {
                Err(UnexpectedParse::Unexpected)
            }
        })
}

/// `+hhmm`, `-hhmm` or any alphabetic zone name (`UT`, `EST`, `CET`, ...).
fn zone<'a>() -> impl Parser<&'a [u8], Output = ()> {
    choice((
        attempt((
            spaces(),
            one_of(b"+-".iter().cloned()),
            digit(),
            digit(),
            digit(),
            digit(),
        ))
        .map(|_| ()),
        skip_many1(letter()),
    ))
}

fn one_or_two_digits_with_cfws<'a>() -> impl Parser<&'a [u8], Output = u32> {
    (
        optional(cfws()),
        digit(),
        optional(digit()),
        optional(cfws()),
    )
        .map(|(_, d1, d2, _)| {
            if let Some(d2) = d2 {
                atoi(d1) * 10 + atoi(d2)
            } else {
                atoi(d1)
            }
        })
}

fn atoi(a: u8) -> u32 {
    u32::from(a - b'0')
}

fn cfws<'a>() -> impl Parser<&'a [u8], Output = ()> {
    (spaces(), skip_many((comment(), spaces()))).map(|_| ())
}

fn comment<'a>() -> impl Parser<&'a [u8], Output = ()> {
    (
        token(b'('),
        skip_many(none_of(br"()\".iter().cloned())),
        token(b')'),
    )
        .map(|_| ())
}
