use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use kline_types::{ProviderError, QueryWindow, RawCrossSectionResponse, RawTabularResponse};

/// Contract a vendor SDK adapter implements.
///
/// The vendor typically exposes one process-wide connection handle, so an
/// implementation is expected to be shared behind an `Arc` and driven through a
/// single session manager rather than called concurrently on its own. Every
/// operation is fallible and reports the vendor's non-zero error code verbatim.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// A stable identifier used in errors and logs (e.g. "wind").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Open the vendor connection, waiting at most `timeout`.
    async fn connect(&self, timeout: Duration) -> Result<(), ProviderError>;

    /// Close the vendor connection.
    async fn disconnect(&self) -> Result<(), ProviderError>;

    /// Report whether the vendor considers the connection open.
    fn is_connected(&self) -> Result<bool, ProviderError>;

    /// Fetch a date-indexed series for one security.
    async fn fetch_series(
        &self,
        code: &str,
        fields: &[String],
        window: &QueryWindow,
    ) -> Result<RawTabularResponse, ProviderError>;

    /// Fetch a realtime snapshot across securities.
    async fn fetch_snapshot(
        &self,
        codes: &[String],
        fields: &[String],
    ) -> Result<RawCrossSectionResponse, ProviderError>;

    /// Fetch the exchange trading days in `[start, end]`.
    async fn fetch_calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exchange: &str,
    ) -> Result<Vec<NaiveDate>, ProviderError>;

    /// Fetch fundamentals across securities as of a trade date.
    async fn fetch_cross_section(
        &self,
        codes: &[String],
        fields: &[String],
        as_of: NaiveDate,
    ) -> Result<RawCrossSectionResponse, ProviderError>;
}
