use chrono::NaiveDate;
use kline_core::{Capability, KlineError, normalize_calendar};

use crate::Kline;

impl Kline {
    /// Exchange trading days in `[start, end]`, ascending.
    ///
    /// `end` defaults to today in the configured timezone and `exchange` to the
    /// configured default (`SSE`). Unlike
    /// [`approximate_trading_days`](kline_core::dates::approximate_trading_days)
    /// this reflects the exchange's real holiday schedule.
    ///
    /// # Errors
    /// `InvalidArg` if `start > end` or the exchange is blank, plus session errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "kline::router::trading_days", skip(self))
    )]
    pub async fn trading_days(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exchange: Option<&str>,
    ) -> Result<Vec<NaiveDate>, KlineError> {
        let end = end.unwrap_or_else(|| self.today());
        if start > end {
            return Err(KlineError::InvalidArg(format!(
                "calendar start {start} is after end {end}"
            )));
        }
        let exchange = exchange.unwrap_or(self.cfg.default_exchange.as_str());
        if exchange.trim().is_empty() {
            return Err(KlineError::InvalidArg("exchange must not be empty".into()));
        }
        let days = self
            .session
            .with_session(Capability::Calendar, |p| async move {
                p.fetch_calendar(start, end, exchange).await
            })
            .await?;
        let mut days = normalize_calendar(days);
        days.retain(|d| (start..=end).contains(d));
        Ok(days)
    }
}
