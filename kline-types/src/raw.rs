//! Raw parallel-array payloads as handed over by a provider, before validation.
use serde::{Deserialize, Serialize};

use crate::Cell;

/// Date-indexed provider response: `rows[i]` belongs to `dates[i]`, `rows[i][j]` to `fields[j]`.
///
/// Nothing about this shape is trusted; see `kline_core::timeseries::normalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTabularResponse {
    /// Date strings in any of the supported input formats.
    pub dates: Vec<String>,
    /// Column names.
    pub fields: Vec<String>,
    /// Row-major values.
    pub rows: Vec<Vec<Cell>>,
}

/// Code-indexed provider response used by snapshot and fundamentals queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCrossSectionResponse {
    /// Security codes, e.g. `000001.SZ`.
    pub codes: Vec<String>,
    /// Column names.
    pub fields: Vec<String>,
    /// Row-major values; `rows[i]` belongs to `codes[i]`.
    pub rows: Vec<Vec<Cell>>,
}
