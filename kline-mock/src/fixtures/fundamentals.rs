use chrono::{Datelike, NaiveDate};
use kline_core::{Cell, RawCrossSectionResponse};

use super::base_price;

fn metric(base: f64, as_of: NaiveDate, field: &str) -> Cell {
    let year_factor = 1.0 + f64::from(as_of.year() - 2020) * 0.03;
    match field {
        "pe_ttm" => Some(base.ln() * 2.5 * year_factor),
        "pb_lf" => Some(base.sqrt() / 3.0),
        "mkt_cap_ard" => Some(base * 2.9e10 * year_factor),
        "roe_ttm2" => Some(11.0 + base.log10()),
        "total_shares" => Some(2.9e10),
        _ => None,
    }
}

/// Fundamentals as of `as_of`; unknown codes yield a row of `None`.
pub fn by_codes(codes: &[String], fields: &[String], as_of: NaiveDate) -> RawCrossSectionResponse {
    RawCrossSectionResponse {
        codes: codes.to_vec(),
        fields: fields.to_vec(),
        rows: codes
            .iter()
            .map(|c| match base_price(c) {
                Some(base) => fields.iter().map(|f| metric(base, as_of, f)).collect(),
                None => vec![None; fields.len()],
            })
            .collect(),
    }
}
