pub mod calendar;
pub mod fundamentals;
pub mod series;
pub mod snapshot;

/// Reference price per known security; drives every fixture.
pub fn base_price(code: &str) -> Option<f64> {
    match code {
        "600000.SH" => Some(10.0),
        "000001.SZ" => Some(12.5),
        "600519.SH" => Some(1700.0),
        "000300.SH" => Some(3500.0),
        _ => None,
    }
}
