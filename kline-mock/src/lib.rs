//! Mock market data providers for tests and demos.
//!
//! - [`MockProvider`]: deterministic fixtures for a handful of securities
//!   (`600000.SH`, `000001.SZ`, `600519.SH`, `000300.SH`). The special codes
//!   `FAIL` and `TIMEOUT` force a provider error or a slow answer.
//! - [`DynamicMockProvider`]: every call scripted from a test through a
//!   [`DynamicMockController`], with call counters.
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use kline_core::{
    MarketDataProvider, ProviderError, QueryWindow, RawCrossSectionResponse, RawTabularResponse,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Vendor code reported for forced failures.
pub const FORCED_FAILURE_CODE: i32 = -40_520_007;
/// Vendor code reported when a security has no fixture data.
pub const NO_DATA_CODE: i32 = -40_522_017;

/// Mock provider backed by static fixtures.
#[derive(Default)]
pub struct MockProvider {
    connected: AtomicBool,
    connects: AtomicUsize,
    latency: Option<Duration>,
}

impl MockProvider {
    /// Create a disconnected mock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            connects: AtomicUsize::new(0),
            latency: None,
        }
    }

    /// Create a disconnected mock whose fetches each wait `latency` first.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self {
            connected: AtomicBool::new(false),
            connects: AtomicUsize::new(0),
            latency: Some(latency),
        }
    }

    /// Number of successful `connect` calls so far.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_timeout(code: &str, capability: &str) -> Result<(), ProviderError> {
        match code {
            "FAIL" => Err(ProviderError::new(
                FORCED_FAILURE_CODE,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough for a short operation timeout to fire.
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn ensure_up(&self) -> Result<(), ProviderError> {
        if let Some(delay) = self.latency {
            tokio::time::sleep(delay).await;
        }
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProviderError::new(-103, "not connected"))
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "kline-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn connect(&self, _timeout: Duration) -> Result<(), ProviderError> {
        self.connected.store(true, Ordering::SeqCst);
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> Result<bool, ProviderError> {
        Ok(self.connected.load(Ordering::SeqCst))
    }

    async fn fetch_series(
        &self,
        code: &str,
        fields: &[String],
        window: &QueryWindow,
    ) -> Result<RawTabularResponse, ProviderError> {
        self.ensure_up().await?;
        Self::maybe_fail_or_timeout(code, "series").await?;
        fixtures::series::by_code(code, fields, window)
            .ok_or_else(|| ProviderError::new(NO_DATA_CODE, format!("no data for {code}")))
    }

    async fn fetch_snapshot(
        &self,
        codes: &[String],
        fields: &[String],
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        self.ensure_up().await?;
        for c in codes {
            Self::maybe_fail_or_timeout(c, "snapshot").await?;
        }
        Ok(fixtures::snapshot::by_codes(codes, fields))
    }

    async fn fetch_calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exchange: &str,
    ) -> Result<Vec<NaiveDate>, ProviderError> {
        self.ensure_up().await?;
        Self::maybe_fail_or_timeout(exchange, "calendar").await?;
        if !fixtures::calendar::supports_exchange(exchange) {
            return Err(ProviderError::new(
                NO_DATA_CODE,
                format!("unknown exchange {exchange}"),
            ));
        }
        Ok(fixtures::calendar::trading_days(start, end))
    }

    async fn fetch_cross_section(
        &self,
        codes: &[String],
        fields: &[String],
        as_of: NaiveDate,
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        self.ensure_up().await?;
        for c in codes {
            Self::maybe_fail_or_timeout(c, "cross-section").await?;
        }
        Ok(fixtures::fundamentals::by_codes(codes, fields, as_of))
    }
}
