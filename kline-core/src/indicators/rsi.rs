use super::{close_column, ensure_period, mean, rolling};
use crate::{Cell, KlineError, TimeSeries};

/// Relative strength index with trailing simple means of gains and losses.
///
/// `rsi = 100 - 100 / (1 + avg_gain / avg_loss)`, and `100` when `avg_loss` is
/// zero. The first `period` values are `None` since the first delta only exists
/// at row 1.
#[must_use]
pub fn rsi_values(values: &[Cell], period: usize) -> Vec<Cell> {
    let mut gains: Vec<Cell> = vec![None; values.len()];
    let mut losses: Vec<Cell> = vec![None; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(cur)) = (values[i - 1], values[i]) {
            let delta = cur - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }
    let avg_gain = rolling(&gains, period, mean);
    let avg_loss = rolling(&losses, period, mean);
    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(g, l)| {
            let (g, l) = (g?, l?);
            if l == 0.0 {
                Some(100.0)
            } else {
                Some(100.0 - 100.0 / (1.0 + g / l))
            }
        })
        .collect()
}

/// Add an `rsi` column.
///
/// The conventional period is 14.
///
/// # Errors
/// Returns `MissingField` without `close`, `InvalidArg` for a zero period.
pub fn rsi(series: &TimeSeries, period: usize) -> Result<TimeSeries, KlineError> {
    ensure_period("rsi", period)?;
    let close = close_column(series)?;
    series.with_column("rsi", rsi_values(&close, period))
}
