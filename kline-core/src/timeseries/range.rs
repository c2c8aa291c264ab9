use chrono::NaiveDate;

use crate::TimeSeries;

/// Rows with `start <= date <= end`; an absent bound is open on that side.
///
/// The input is left untouched.
#[must_use]
pub fn filter_by_range(
    series: &TimeSeries,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> TimeSeries {
    series.retain_dates(|d| start.is_none_or(|s| s <= d) && end.is_none_or(|e| d <= e))
}
