use serde::Serialize;
use serde_json::{Map, Value};

use crate::series::{cell_to_json, ensure_shape, ensure_unique_fields};
use crate::{Cell, KlineError};

/// Code-indexed numeric table for realtime snapshots and fundamentals.
///
/// Same shape invariants as [`crate::TimeSeries`], but rows are keyed by unique
/// security codes kept in provider order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CrossSection {
    keys: Vec<String>,
    fields: Vec<String>,
    matrix: Vec<Vec<Cell>>,
}

impl CrossSection {
    /// Build a cross-section from its parts, validating the invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` for duplicate keys or fields and for a matrix whose
    /// shape disagrees with `keys` x `fields`.
    pub fn try_new(
        keys: Vec<String>,
        fields: Vec<String>,
        matrix: Vec<Vec<Cell>>,
    ) -> Result<Self, KlineError> {
        {
            let mut seen = std::collections::HashSet::with_capacity(keys.len());
            if let Some(dup) = keys.iter().find(|k| !seen.insert(k.as_str())) {
                return Err(KlineError::InvalidArg(format!("duplicate key '{dup}'")));
            }
        }
        ensure_unique_fields(&fields)?;
        ensure_shape(keys.len(), fields.len(), &matrix)?;
        Ok(Self {
            keys,
            fields,
            matrix,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Security codes in provider order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Column names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Row-major cells.
    #[must_use]
    pub fn matrix(&self) -> &[Vec<Cell>] {
        &self.matrix
    }

    /// Cells for one security code.
    #[must_use]
    pub fn row_for(&self, key: &str) -> Option<&[Cell]> {
        let i = self.keys.iter().position(|k| k == key)?;
        Some(&self.matrix[i])
    }

    /// Cell at `(key, field)`.
    #[must_use]
    pub fn value(&self, key: &str, field: &str) -> Cell {
        let j = self.fields.iter().position(|f| f == field)?;
        self.row_for(key)?[j]
    }

    /// One JSON object per security: `{"code": "...", "<field>": number | null, ...}`.
    #[must_use]
    pub fn to_records(&self) -> Vec<Value> {
        self.keys
            .iter()
            .zip(&self.matrix)
            .map(|(code, row)| {
                let mut rec = Map::with_capacity(self.fields.len() + 1);
                rec.insert("code".to_string(), Value::String(code.clone()));
                for (field, cell) in self.fields.iter().zip(row) {
                    rec.insert(field.clone(), cell_to_json(*cell));
                }
                Value::Object(rec)
            })
            .collect()
    }
}
