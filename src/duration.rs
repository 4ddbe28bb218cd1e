use crate::error::{Error, Result};
use combine::{
    parser::{
        byte::digit,
        choice::optional,
        range::recognize,
        repeat::{skip_many, skip_many1},
        token::{eof, one_of, token},
    },
    Parser,
};

/// `<number> <unit>`, e.g. `30d` or `0.5 y`.
fn duration<'a>() -> impl Parser<&'a [u8], Output = (&'a [u8], u8)> {
    (
        recognize((
            skip_many1(digit()),
            optional((token(b'.'), skip_many1(digit()))),
        )),
        skip_many(token(b' ')),
        one_of(b"dwmyDWMY".iter().cloned()),
        eof(),
    )
        .map(|(value, _, unit, _): (&[u8], (), u8, ())| (value, unit.to_ascii_lowercase()))
}

/// Days per unit. Months and years are fixed approximations.
fn days_per_unit(unit: u8) -> f64 {
    match unit {
        b'w' => 7.,
        b'm' => 28.,
        b'y' => 365.,
        _ => 1.,
    }
}

/// Parses a human readable duration into a number of whole days.
pub fn parse_duration(text: &str) -> Result<u32> {
    let invalid = || Error::InvalidDuration(text.to_string());
    let ((value, unit), _) = duration()
        .parse(text.trim().as_bytes())
        .map_err(|_| invalid())?;
    let value: f64 = std::str::from_utf8(value)
        .ok()
        .and_then(|value| value.parse().ok())
        .ok_or_else(invalid)?;
    Ok((value * days_per_unit(unit)).floor() as u32)
}
