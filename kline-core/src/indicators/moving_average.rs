use super::{close_column, ensure_period, mean, rolling};
use crate::{Cell, KlineError, TimeSeries};

/// Trailing simple moving average; the first `period - 1` values are `None`.
#[must_use]
pub fn sma_values(values: &[Cell], period: usize) -> Vec<Cell> {
    rolling(values, period, mean)
}

/// Exponential moving average with smoothing `alpha = 2 / (period + 1)`.
///
/// Seeded with the first available value, so it is defined from that row on.
/// A missing input yields `None` at that row and leaves the running average
/// unchanged for the next available value.
#[must_use]
pub fn ema_values(values: &[Cell], period: usize) -> Vec<Cell> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut state: Option<f64> = None;
    values
        .iter()
        .map(|v| {
            let x = (*v)?;
            let next = match state {
                Some(prev) => x * alpha + prev * (1.0 - alpha),
                None => x,
            };
            state = Some(next);
            Some(next)
        })
        .collect()
}

/// Add an `ma{period}` column.
///
/// # Errors
/// Returns `MissingField` without `close`, `InvalidArg` for a zero period.
pub fn sma(series: &TimeSeries, period: usize) -> Result<TimeSeries, KlineError> {
    ensure_period("sma", period)?;
    let close = close_column(series)?;
    series.with_column(&format!("ma{period}"), sma_values(&close, period))
}

/// Add an `ema{period}` column.
///
/// # Errors
/// Returns `MissingField` without `close`, `InvalidArg` for a zero period.
pub fn ema(series: &TimeSeries, period: usize) -> Result<TimeSeries, KlineError> {
    ensure_period("ema", period)?;
    let close = close_column(series)?;
    series.with_column(&format!("ema{period}"), ema_values(&close, period))
}
