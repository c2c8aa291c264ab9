//! Date-string handling and weekday arithmetic.
//!
//! Three input formats are accepted, tried in this order: `YYYY-MM-DD`,
//! `YYYY/MM/DD`, `YYYYMMDD`. The canonical output format is `YYYY-MM-DD`.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::KlineError;

/// Accepted input formats in priority order.
pub const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Canonical output format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

// chrono tolerates leading whitespace and signed years; the accepted formats
// do not, so the byte layout is checked before parsing.
fn has_shape(s: &str, sep: Option<u8>) -> bool {
    let b = s.as_bytes();
    match sep {
        Some(sep) => {
            b.len() == 10
                && b.iter().enumerate().all(|(i, c)| match i {
                    4 | 7 => *c == sep,
                    _ => c.is_ascii_digit(),
                })
        }
        None => b.len() == 8 && b.iter().all(u8::is_ascii_digit),
    }
}

fn parse_any(s: &str) -> Option<NaiveDate> {
    INPUT_FORMATS
        .iter()
        .zip([Some(b'-'), Some(b'/'), None])
        .filter(|(_, sep)| has_shape(s, *sep))
        .find_map(|(fmt, _)| NaiveDate::parse_from_str(s, fmt).ok())
}

/// True if `s` is a real calendar date in one of the accepted formats.
#[must_use]
pub fn validate_date_format(s: &str) -> bool {
    parse_any(s).is_some()
}

/// Rewrite `s` as `YYYY-MM-DD`, or return it unchanged when no format matches.
///
/// An unchanged return value is not necessarily a date; re-validate (or use
/// [`parse_date`]) before relying on it.
#[must_use]
pub fn standardize_date(s: &str) -> String {
    parse_any(s).map_or_else(|| s.to_string(), |d| d.format(CANONICAL_FORMAT).to_string())
}

/// Parse `s` in any accepted format.
///
/// # Errors
/// Returns `InvalidDate` when no format matches.
pub fn parse_date(s: &str) -> Result<NaiveDate, KlineError> {
    parse_any(s).ok_or_else(|| KlineError::InvalidDate(s.to_string()))
}

fn is_weekday(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `count` most recent Monday-Friday dates up to and including `end`, ascending.
///
/// `end` defaults to the current local date.
///
/// This is a calendar approximation: exchange holidays are NOT excluded, so the
/// result may contain days the market was closed. Callers that need the real
/// exchange schedule must ask the provider's calendar instead.
#[must_use]
pub fn approximate_trading_days(end: Option<NaiveDate>, count: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(count.min(4096));
    let mut cur = end.unwrap_or_else(|| Local::now().date_naive());
    while out.len() < count {
        if is_weekday(cur) {
            out.push(cur);
        }
        match cur.checked_sub_days(Days::new(1)) {
            Some(prev) => cur = prev,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Inclusive number of days from `start` to `end`: `(end - start).days + 1`.
///
/// The result is zero or negative when `end` precedes `start`.
///
/// # Errors
/// Returns `InvalidDate` if either endpoint is not a date in an accepted format.
pub fn day_count(start: &str, end: &str) -> Result<i64, KlineError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Ok((end - start).num_days() + 1)
}
