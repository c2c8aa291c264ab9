//! Timeframe code + look-back count to a concrete [`QueryWindow`].
//!
//! Supported codes:
//!
//! | code | granularity            | start                                  |
//! |------|------------------------|----------------------------------------|
//! | `D`  | `Daily`                | reference - N days                     |
//! | `W`  | `Weekly`               | reference - N weeks                    |
//! | `M`  | `Monthly`              | reference - N*30 days                  |
//! | `n`  | `IntradayMinutes(n)`   | reference - n*N minutes, as a date     |
//!
//! The monthly rule counts every month as 30 days. This is a deliberate
//! simplification rather than calendar-month arithmetic; downstream consumers
//! depend on the exact window it produces, so it is kept as is.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::{AdjustmentMode, Granularity, KlineError, QueryWindow};

/// Resolve a window ending on `reference`.
///
/// Intraday offsets are measured from the start of `reference`, so any
/// positive intraday look-back reaches back at least into the previous day.
///
/// # Errors
/// - `InvalidTimeframe` if `code` is not `D`, `W`, `M`, or a positive integer.
/// - `InvalidArg` if the offset leaves the representable date range.
pub fn resolve_window(code: &str, lookback: u32, reference: NaiveDate) -> Result<QueryWindow, KlineError> {
    resolve_window_at(code, lookback, reference.and_time(NaiveTime::MIN))
}

/// Resolve a window ending on the date of `reference`, honoring its time of day
/// for intraday codes.
///
/// # Errors
/// Same as [`resolve_window`].
pub fn resolve_window_at(
    code: &str,
    lookback: u32,
    reference: NaiveDateTime,
) -> Result<QueryWindow, KlineError> {
    let granularity: Granularity = code.parse()?;
    let end = reference.date();
    let n = u64::from(lookback);

    let start = match granularity {
        Granularity::Daily => end.checked_sub_days(Days::new(n)),
        Granularity::Weekly => end.checked_sub_days(Days::new(n * 7)),
        Granularity::Monthly => end.checked_sub_days(Days::new(n * 30)),
        Granularity::IntradayMinutes(m) => {
            i64::from(m)
                .checked_mul(i64::from(lookback))
                .and_then(TimeDelta::try_minutes)
                .and_then(|delta| reference.checked_sub_signed(delta))
                .map(|dt| dt.date())
        }
    }
    .ok_or_else(|| {
        KlineError::InvalidArg(format!(
            "look-back of {lookback} x {granularity} before {reference} is out of range"
        ))
    })?;

    QueryWindow::try_new(start, end, granularity, AdjustmentMode::Forward)
}
