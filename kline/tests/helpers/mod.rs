// Re-export helpers so tests can `use helpers::*;`
pub mod recording_provider;

pub use recording_provider::RecordingProvider;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kline::{Kline, MarketDataProvider, RawCrossSectionResponse, RawTabularResponse};
use kline_mock::{DynamicMockController, DynamicMockProvider};

/// Common security codes used across tests.
#[allow(dead_code)]
pub const PUFA: &str = "600000.SH";
#[allow(dead_code)]
pub const PINGAN: &str = "000001.SZ";
#[allow(dead_code)]
pub const MOUTAI: &str = "600519.SH";

/// Construct a date from components for readability in tests.
#[allow(dead_code)]
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[allow(dead_code)]
pub fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Build a raw close-only payload from `(date, close)` pairs.
#[allow(dead_code)]
pub fn raw_closes(rows: &[(&str, f64)]) -> RawTabularResponse {
    RawTabularResponse {
        dates: rows.iter().map(|(d, _)| (*d).to_string()).collect(),
        fields: vec!["close".into()],
        rows: rows.iter().map(|(_, c)| vec![Some(*c)]).collect(),
    }
}

#[allow(dead_code)]
pub fn raw_cross(codes: &[&str], fields: &[&str], rows: Vec<Vec<Option<f64>>>) -> RawCrossSectionResponse {
    RawCrossSectionResponse {
        codes: strings(codes),
        fields: strings(fields),
        rows,
    }
}

/// A facade over a fresh dynamic mock, with a short operation timeout.
#[allow(dead_code)]
pub fn dynamic_kline() -> (Kline, DynamicMockController) {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    let kline = Kline::builder()
        .with_provider(p)
        .connect_timeout(Duration::from_secs(5))
        .operation_timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    (kline, ctl)
}

/// A facade over the fixture provider.
#[allow(dead_code)]
pub fn fixture_kline() -> Kline {
    let p: Arc<dyn MarketDataProvider> = Arc::new(kline_mock::MockProvider::new());
    Kline::builder().with_provider(p).build().unwrap()
}
