//! Technical indicators computed over a normalized [`TimeSeries`].
//!
//! Every function reads the `close` column (or the named field for
//! [`returns`]), leaves its input untouched, and returns a new series with the
//! indicator columns added. Rows inside an indicator's warm-up window, and rows
//! whose look-back touches a missing close, carry `None`.
//!
//! Column names:
//!
//! | indicator         | columns                                           |
//! |-------------------|---------------------------------------------------|
//! | `sma(p)`          | `ma{p}`                                           |
//! | `ema(p)`          | `ema{p}`                                          |
//! | `macd(f, s, g)`   | `macd`, `signal`, `macd_hist`                     |
//! | `rsi(p)`          | `rsi`                                             |
//! | `bollinger(p, k)` | `boll_mid`, `boll_std`, `boll_upper`, `boll_lower` |
//! | `returns(field)`  | `{field}_return`                                  |

mod bollinger;
mod macd;
mod moving_average;
mod rsi;

pub use bollinger::{BollingerColumns, bollinger, bollinger_values};
pub use macd::{MacdColumns, macd, macd_values};
pub use moving_average::{ema, ema_values, sma, sma_values};
pub use rsi::{rsi, rsi_values};

use crate::{Cell, IndicatorConfig, KlineError, TimeSeries};

/// Name of the price column every indicator reads.
pub const CLOSE: &str = "close";

pub(crate) fn close_column(series: &TimeSeries) -> Result<Vec<Cell>, KlineError> {
    series
        .column(CLOSE)
        .ok_or_else(|| KlineError::missing_field(CLOSE))
}

pub(crate) fn ensure_period(what: &str, period: usize) -> Result<(), KlineError> {
    if period == 0 {
        return Err(KlineError::InvalidArg(format!("{what} period must be positive")));
    }
    Ok(())
}

/// Apply `f` to every complete trailing window of `period` values.
///
/// The result at `i` is `None` when `i + 1 < period` or when any value in the
/// window is missing.
pub(crate) fn rolling<F>(values: &[Cell], period: usize, f: F) -> Vec<Cell>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let mut buf: Vec<f64> = Vec::with_capacity(period);
    for i in (period - 1)..values.len() {
        buf.clear();
        buf.extend(values[i + 1 - period..=i].iter().map_while(|c| *c));
        if buf.len() == period {
            out[i] = Some(f(&buf));
        }
    }
    out
}

pub(crate) fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Simple percentage change of `field`: `x[i] / x[i-1] - 1`, in a `{field}_return` column.
///
/// The first row, rows following a missing value, and rows following a zero are `None`.
///
/// # Errors
/// Returns `MissingField` if `field` is absent.
pub fn returns(series: &TimeSeries, field: &str) -> Result<TimeSeries, KlineError> {
    let values = series
        .column(field)
        .ok_or_else(|| KlineError::missing_field(field))?;
    let mut out: Vec<Cell> = vec![None; values.len()];
    for i in 1..values.len() {
        out[i] = match (values[i - 1], values[i]) {
            (Some(prev), Some(cur)) if prev != 0.0 => Some(cur / prev - 1.0),
            _ => None,
        };
    }
    series.with_column(&format!("{field}_return"), out)
}

/// Apply the standard bundle: every moving average in `cfg.ma_periods`, MACD, RSI,
/// and Bollinger bands.
///
/// # Errors
/// Returns `MissingField` without `close`, or `InvalidArg` for zero periods.
pub fn apply(series: &TimeSeries, cfg: &IndicatorConfig) -> Result<TimeSeries, KlineError> {
    let mut out = series.clone();
    for &p in &cfg.ma_periods {
        out = sma(&out, p)?;
    }
    out = macd(&out, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal)?;
    out = rsi(&out, cfg.rsi_period)?;
    bollinger(&out, cfg.bollinger_period, cfg.bollinger_k)
}
