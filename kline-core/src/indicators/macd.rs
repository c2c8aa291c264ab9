use super::{close_column, ema_values, ensure_period};
use crate::{Cell, KlineError, TimeSeries};

/// MACD line, signal line, and histogram, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    /// `EMA(fast) - EMA(slow)`.
    pub macd: Vec<Cell>,
    /// `EMA(signal)` of the MACD line.
    pub signal: Vec<Cell>,
    /// `macd - signal`.
    pub histogram: Vec<Cell>,
}

/// Compute MACD over raw values.
#[must_use]
pub fn macd_values(values: &[Cell], fast: usize, slow: usize, signal: usize) -> MacdColumns {
    let fast_ema = ema_values(values, fast);
    let slow_ema = ema_values(values, slow);
    let line: Vec<Cell> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_values(&line, signal);
    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();
    MacdColumns {
        macd: line,
        signal: signal_line,
        histogram,
    }
}

/// Add `macd`, `signal`, and `macd_hist` columns.
///
/// The conventional parameters are `(12, 26, 9)`.
///
/// # Errors
/// Returns `MissingField` without `close`, `InvalidArg` for a zero period.
pub fn macd(
    series: &TimeSeries,
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<TimeSeries, KlineError> {
    ensure_period("macd fast", fast)?;
    ensure_period("macd slow", slow)?;
    ensure_period("macd signal", signal)?;
    let close = close_column(series)?;
    let cols = macd_values(&close, fast, slow, signal);
    series
        .with_column("macd", cols.macd)?
        .with_column("signal", cols.signal)?
        .with_column("macd_hist", cols.histogram)
}
