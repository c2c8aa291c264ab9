use kline_core::{Cell, RawCrossSectionResponse};

use super::base_price;

fn quote(base: f64, field: &str) -> Cell {
    let last = base * 1.012;
    match field {
        "rt_last" => Some(last),
        "rt_open" => Some(base),
        "rt_high" => Some(last.max(base) * 1.01),
        "rt_low" => Some(last.min(base) * 0.99),
        "rt_pre_close" => Some(base),
        "rt_chg" => Some(last - base),
        "rt_pct_chg" => Some((last / base - 1.0) * 100.0),
        "rt_vol" => Some(5_000_000.0),
        "rt_amt" => Some(5_000_000.0 * last),
        _ => None,
    }
}

/// Realtime quotes; unknown codes yield a row of `None`.
pub fn by_codes(codes: &[String], fields: &[String]) -> RawCrossSectionResponse {
    RawCrossSectionResponse {
        codes: codes.to_vec(),
        fields: fields.to_vec(),
        rows: codes
            .iter()
            .map(|c| match base_price(c) {
                Some(base) => fields.iter().map(|f| quote(base, f)).collect(),
                None => vec![None; fields.len()],
            })
            .collect(),
    }
}
