use std::sync::Arc;
use std::time::Duration;

use kline::MarketDataProvider;

/// Return a provider for demos.
///
/// Demos run against the fixture provider. Set `KLINE_DEMOS_LATENCY_MS` to make
/// every fixture call wait that long first, which is handy for watching spans.
#[must_use]
pub fn get_provider() -> Arc<dyn MarketDataProvider> {
    let latency = std::env::var("KLINE_DEMOS_LATENCY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis);
    match latency {
        Some(delay) => {
            println!("--- (Using fixture provider with {}ms latency) ---", delay.as_millis());
            Arc::new(kline_mock::MockProvider::with_latency(delay))
        }
        None => Arc::new(kline_mock::MockProvider::new()),
    }
}

/// Format an optional value for table output.
#[must_use]
pub fn cell(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.2}"))
}
