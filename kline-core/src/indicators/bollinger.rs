use super::{close_column, ensure_period, mean, rolling};
use crate::{Cell, KlineError, TimeSeries};

/// Bollinger band columns, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    /// Simple moving average.
    pub mid: Vec<Cell>,
    /// Trailing population standard deviation.
    pub std: Vec<Cell>,
    /// `mid + k * std`.
    pub upper: Vec<Cell>,
    /// `mid - k * std`.
    pub lower: Vec<Cell>,
}

fn population_std(xs: &[f64]) -> f64 {
    let m = mean(xs);
    (xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64).sqrt()
}

/// Compute Bollinger bands over raw values.
#[must_use]
pub fn bollinger_values(values: &[Cell], period: usize, k: f64) -> BollingerColumns {
    let mid = rolling(values, period, mean);
    let std = rolling(values, period, population_std);
    let band = |sign: f64| -> Vec<Cell> {
        mid.iter()
            .zip(&std)
            .map(|(m, s)| Some((*m)? + sign * k * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);
    BollingerColumns {
        mid,
        std,
        upper,
        lower,
    }
}

/// Add `boll_mid`, `boll_std`, `boll_upper`, and `boll_lower` columns.
///
/// The conventional parameters are `(20, 2.0)`.
///
/// # Errors
/// Returns `MissingField` without `close`; `InvalidArg` for a zero period or a
/// negative or non-finite `k`.
pub fn bollinger(series: &TimeSeries, period: usize, k: f64) -> Result<TimeSeries, KlineError> {
    ensure_period("bollinger", period)?;
    if !k.is_finite() || k < 0.0 {
        return Err(KlineError::InvalidArg(format!(
            "bollinger width must be a non-negative number, got {k}"
        )));
    }
    let close = close_column(series)?;
    let cols = bollinger_values(&close, period, k);
    series
        .with_column("boll_mid", cols.mid)?
        .with_column("boll_std", cols.std)?
        .with_column("boll_upper", cols.upper)?
        .with_column("boll_lower", cols.lower)
}
