use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Cell, KlineError};

/// Canonical date-indexed numeric table.
///
/// Invariants, checked by every constructor:
/// - `axis` is strictly ascending (hence unique);
/// - `fields` are unique;
/// - `matrix` has `axis.len()` rows of exactly `fields.len()` cells.
///
/// Cells are `Option<f64>`; `None` is the missing-value marker and is never
/// replaced by zero. All transformations return a new series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    axis: Vec<NaiveDate>,
    fields: Vec<String>,
    matrix: Vec<Vec<Cell>>,
}

impl TimeSeries {
    /// Build a series from its parts, validating the invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first violated invariant.
    pub fn try_new(
        axis: Vec<NaiveDate>,
        fields: Vec<String>,
        matrix: Vec<Vec<Cell>>,
    ) -> Result<Self, KlineError> {
        if let Some(w) = axis.windows(2).find(|w| w[0] >= w[1]) {
            return Err(KlineError::InvalidArg(format!(
                "date axis not strictly ascending at {} -> {}",
                w[0], w[1]
            )));
        }
        ensure_unique_fields(&fields)?;
        ensure_shape(axis.len(), fields.len(), &matrix)?;
        Ok(Self {
            axis,
            fields,
            matrix,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    /// True when the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Ascending date axis.
    #[must_use]
    pub fn axis(&self) -> &[NaiveDate] {
        &self.axis
    }

    /// Column names in order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Row-major cells.
    #[must_use]
    pub fn matrix(&self) -> &[Vec<Cell>] {
        &self.matrix
    }

    /// First date on the axis.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.axis.first().copied()
    }

    /// Last date on the axis.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.axis.last().copied()
    }

    /// Position of a field.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Copy one column out of the matrix.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let j = self.field_index(name)?;
        Some(self.matrix.iter().map(|row| row[j]).collect())
    }

    /// Date and cells of row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<(NaiveDate, &[Cell])> {
        Some((*self.axis.get(i)?, self.matrix.get(i)?.as_slice()))
    }

    /// Cell at `(date, field)`.
    #[must_use]
    pub fn value(&self, date: NaiveDate, field: &str) -> Cell {
        let j = self.field_index(field)?;
        let i = self.axis.binary_search(&date).ok()?;
        self.matrix[i][j]
    }

    /// Return a new series with `name` set to `values`.
    ///
    /// An existing column of the same name is replaced in place; otherwise the
    /// column is appended after the existing fields.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `values.len()` differs from the row count.
    pub fn with_column(&self, name: &str, values: Vec<Cell>) -> Result<Self, KlineError> {
        if values.len() != self.axis.len() {
            return Err(KlineError::InvalidArg(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.axis.len()
            )));
        }
        let mut out = self.clone();
        match out.field_index(name) {
            Some(j) => {
                for (row, v) in out.matrix.iter_mut().zip(values) {
                    row[j] = v;
                }
            }
            None => {
                out.fields.push(name.to_string());
                for (row, v) in out.matrix.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(out)
    }

    /// Keep only the rows whose date satisfies `keep`.
    #[must_use]
    pub fn retain_dates<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(NaiveDate) -> bool,
    {
        let (axis, matrix) = self
            .axis
            .iter()
            .zip(&self.matrix)
            .filter(|(d, _)| keep(**d))
            .map(|(d, row)| (*d, row.clone()))
            .unzip();
        // A subsequence of an ascending axis is still ascending.
        Self {
            axis,
            fields: self.fields.clone(),
            matrix,
        }
    }

    /// One JSON object per row: `{"date": "YYYY-MM-DD", "<field>": number | null, ...}`.
    #[must_use]
    pub fn to_records(&self) -> Vec<Value> {
        self.axis
            .iter()
            .zip(&self.matrix)
            .map(|(date, row)| {
                let mut rec = Map::with_capacity(self.fields.len() + 1);
                rec.insert(
                    "date".to_string(),
                    Value::String(date.format("%Y-%m-%d").to_string()),
                );
                for (field, cell) in self.fields.iter().zip(row) {
                    rec.insert(field.clone(), cell_to_json(*cell));
                }
                Value::Object(rec)
            })
            .collect()
    }
}

pub(crate) fn cell_to_json(cell: Cell) -> Value {
    cell.and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

pub(crate) fn ensure_unique_fields(fields: &[String]) -> Result<(), KlineError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    for f in fields {
        if !seen.insert(f.as_str()) {
            return Err(KlineError::InvalidArg(format!("duplicate field '{f}'")));
        }
    }
    Ok(())
}

pub(crate) fn ensure_shape(rows: usize, cols: usize, matrix: &[Vec<Cell>]) -> Result<(), KlineError> {
    if matrix.len() != rows {
        return Err(KlineError::InvalidArg(format!(
            "matrix has {} rows, expected {rows}",
            matrix.len()
        )));
    }
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(KlineError::InvalidArg(format!(
            "row {i} has {} cells, expected {cols}",
            row.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn close_series() -> TimeSeries {
        TimeSeries::try_new(
            vec![d(1), d(2), d(3)],
            vec!["close".into()],
            vec![vec![Some(10.0)], vec![None], vec![Some(12.0)]],
        )
        .unwrap()
    }

    #[test]
    fn rejects_unsorted_or_duplicate_axis() {
        let err = TimeSeries::try_new(vec![d(2), d(1)], vec!["close".into()], vec![vec![None]; 2]);
        assert!(err.is_err());
        let err = TimeSeries::try_new(vec![d(1), d(1)], vec!["close".into()], vec![vec![None]; 2]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_ragged_matrix_and_duplicate_fields() {
        let err = TimeSeries::try_new(
            vec![d(1)],
            vec!["open".into(), "close".into()],
            vec![vec![Some(1.0)]],
        );
        assert!(err.is_err());
        let err = TimeSeries::try_new(
            vec![d(1)],
            vec!["close".into(), "close".into()],
            vec![vec![Some(1.0), Some(2.0)]],
        );
        assert!(err.is_err());
    }

    #[test]
    fn with_column_appends_then_replaces() {
        let s = close_series();
        let s2 = s.with_column("x", vec![Some(1.0), Some(2.0), None]).unwrap();
        assert_eq!(s2.fields(), ["close", "x"]);
        assert_eq!(s.fields(), ["close"], "input must not be mutated");
        let s3 = s2.with_column("x", vec![None, None, Some(3.0)]).unwrap();
        assert_eq!(s3.fields(), ["close", "x"]);
        assert_eq!(s3.column("x").unwrap(), vec![None, None, Some(3.0)]);
        assert!(s.with_column("y", vec![None]).is_err());
    }

    #[test]
    fn records_render_missing_as_null() {
        let recs = close_series().to_records();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0]["date"], "2024-01-01");
        assert_eq!(recs[0]["close"], 10.0);
        assert!(recs[1]["close"].is_null());
    }

    #[test]
    fn value_lookup_by_date() {
        let s = close_series();
        assert_eq!(s.value(d(3), "close"), Some(12.0));
        assert_eq!(s.value(d(2), "close"), None);
        assert_eq!(s.value(d(9), "close"), None);
    }
}
