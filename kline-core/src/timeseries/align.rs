use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::{Cell, KlineError, TimeSeries};

/// Outer-join labelled series on the union of their dates.
///
/// - The output axis is the ascending union of every input axis.
/// - Each input contributes all of its fields; cells at dates the input does not
///   cover are `None`.
/// - A field name that appears in more than one input is renamed to
///   `"{label}.{field}"` in every input carrying it; unique names are kept as is.
///
/// # Errors
/// Returns `InvalidArg` if a column name is still ambiguous after prefixing
/// (for example, the same label used twice for inputs sharing a field).
pub fn align<'a, I>(inputs: I) -> Result<TimeSeries, KlineError>
where
    I: IntoIterator<Item = (&'a str, &'a TimeSeries)>,
{
    let inputs: Vec<(&str, &TimeSeries)> = inputs.into_iter().collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for (_, s) in &inputs {
        for f in s.fields() {
            *occurrences.entry(f.as_str()).or_default() += 1;
        }
    }

    let mut fields: Vec<String> = Vec::new();
    for (label, s) in &inputs {
        for f in s.fields() {
            if occurrences[f.as_str()] > 1 {
                fields.push(format!("{label}.{f}"));
            } else {
                fields.push(f.clone());
            }
        }
    }

    let axis: Vec<NaiveDate> = inputs
        .iter()
        .flat_map(|(_, s)| s.axis().iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut matrix: Vec<Vec<Cell>> = vec![Vec::with_capacity(fields.len()); axis.len()];
    for (_, s) in &inputs {
        let width = s.fields().len();
        let mut src = s.axis().iter().zip(s.matrix()).peekable();
        for (date, out_row) in axis.iter().zip(matrix.iter_mut()) {
            match src.peek() {
                Some((d, row)) if *d == date => {
                    out_row.extend_from_slice(row);
                    src.next();
                }
                _ => out_row.extend(std::iter::repeat_n(None, width)),
            }
        }
    }

    TimeSeries::try_new(axis, fields, matrix).map_err(|e| match e {
        KlineError::InvalidArg(msg) => KlineError::InvalidArg(format!("ambiguous aligned columns: {msg}")),
        other => other,
    })
}
