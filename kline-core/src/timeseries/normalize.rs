use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::dates::{parse_date, standardize_date};
use crate::{
    Cell, CrossSection, KlineError, RawCrossSectionResponse, RawTabularResponse, TimeSeries,
};

/// Validate a raw date-indexed response and convert it into a [`TimeSeries`].
///
/// - Every date is standardized first; any date that still does not parse fails.
/// - `rows` must have one row per date and one cell per field.
/// - Rows are sorted ascending by date, keeping each row with its date.
/// - On duplicate dates the last occurrence wins.
/// - Non-finite numbers are treated as missing.
///
/// This is the single place where provider data enters the typed world; it
/// never repairs structure beyond ordering and de-duplication.
///
/// # Errors
/// Returns `MalformedResponse` for any structural mismatch.
pub fn normalize(raw: RawTabularResponse) -> Result<TimeSeries, KlineError> {
    let RawTabularResponse {
        dates,
        fields,
        rows,
    } = raw;

    if rows.len() != dates.len() {
        return Err(KlineError::malformed(format!(
            "{} rows for {} dates",
            rows.len(),
            dates.len()
        )));
    }
    ensure_fields_unique(&fields)?;

    let mut by_date: BTreeMap<NaiveDate, Vec<Cell>> = BTreeMap::new();
    let mut prev: Option<NaiveDate> = None;
    let mut reordered = false;
    let mut duplicates = 0usize;

    for (i, (date, row)) in dates.iter().zip(rows).enumerate() {
        let day = parse_date(&standardize_date(date))
            .map_err(|_| KlineError::malformed(format!("row {i}: unparseable date '{date}'")))?;
        if row.len() != fields.len() {
            return Err(KlineError::malformed(format!(
                "row {i} ({day}) has {} cells for {} fields",
                row.len(),
                fields.len()
            )));
        }
        if prev.is_some_and(|p| day < p) {
            reordered = true;
        }
        prev = Some(day);
        if by_date.insert(day, sanitize(row)).is_some() {
            duplicates += 1;
        }
    }

    #[cfg(feature = "tracing")]
    {
        if reordered || duplicates > 0 {
            tracing::warn!(
                reordered,
                duplicates,
                rows = dates.len(),
                "normalized out-of-order or duplicated provider rows"
            );
        }
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (reordered, duplicates);

    let (axis, matrix): (Vec<NaiveDate>, Vec<Vec<Cell>>) = by_date.into_iter().unzip();
    TimeSeries::try_new(axis, fields, matrix).map_err(|e| KlineError::malformed(e.to_string()))
}

/// Validate a raw code-indexed response and convert it into a [`CrossSection`].
///
/// Provider row order is preserved.
///
/// # Errors
/// Returns `MalformedResponse` for shape mismatches or duplicate codes/fields.
pub fn normalize_cross_section(raw: RawCrossSectionResponse) -> Result<CrossSection, KlineError> {
    let RawCrossSectionResponse {
        codes,
        fields,
        rows,
    } = raw;
    if rows.len() != codes.len() {
        return Err(KlineError::malformed(format!(
            "{} rows for {} codes",
            rows.len(),
            codes.len()
        )));
    }
    ensure_fields_unique(&fields)?;
    if let Some(dup) = first_duplicate(&codes) {
        return Err(KlineError::malformed(format!("duplicate code '{dup}'")));
    }
    let matrix = rows.into_iter().map(sanitize).collect();
    CrossSection::try_new(codes, fields, matrix).map_err(|e| KlineError::malformed(e.to_string()))
}

/// Sort and de-duplicate a provider calendar.
#[must_use]
pub fn normalize_calendar(mut days: Vec<NaiveDate>) -> Vec<NaiveDate> {
    days.sort_unstable();
    days.dedup();
    days
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(String::as_str)
        .find(|n| !seen.insert(*n))
}

fn ensure_fields_unique(fields: &[String]) -> Result<(), KlineError> {
    match first_duplicate(fields) {
        Some(dup) => Err(KlineError::malformed(format!("duplicate field '{dup}'"))),
        None => Ok(()),
    }
}

fn sanitize(row: Vec<Cell>) -> Vec<Cell> {
    row.into_iter()
        .map(|c| c.filter(|v| v.is_finite()))
        .collect()
}
