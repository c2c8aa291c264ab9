use chrono::NaiveDate;
use kline_core::{Capability, CrossSection, KlineError, normalize_cross_section};

use super::{require_codes, require_fields};
use crate::Kline;

impl Kline {
    /// Fetch a realtime snapshot of `fields` for each code.
    ///
    /// Rows keep the provider's code order.
    ///
    /// # Errors
    /// `InvalidArg` for empty inputs, session errors, or `MalformedResponse`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "kline::router::realtime", skip(self))
    )]
    pub async fn realtime(
        &self,
        codes: &[String],
        fields: &[String],
    ) -> Result<CrossSection, KlineError> {
        require_codes(codes)?;
        require_fields(fields)?;
        let raw = self
            .session
            .with_session(Capability::Snapshot, |p| async move {
                p.fetch_snapshot(codes, fields).await
            })
            .await?;
        normalize_cross_section(raw)
    }

    /// Fetch a realtime snapshot of the configured default realtime fields
    /// (last, volume, amount, change, percent change unless overridden).
    ///
    /// # Errors
    /// Everything [`realtime`](Self::realtime) returns.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "kline::router::quote", skip(self))
    )]
    pub async fn quote(&self, codes: &[String]) -> Result<CrossSection, KlineError> {
        self.realtime(codes, &self.cfg.default_realtime_fields).await
    }

    /// Fetch fundamentals for each code as of `as_of` (default: today in the
    /// configured timezone).
    ///
    /// # Errors
    /// `InvalidArg` for empty inputs, session errors, or `MalformedResponse`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "kline::router::fundamentals", skip(self))
    )]
    pub async fn fundamentals(
        &self,
        codes: &[String],
        fields: &[String],
        as_of: Option<NaiveDate>,
    ) -> Result<CrossSection, KlineError> {
        require_codes(codes)?;
        require_fields(fields)?;
        let as_of = as_of.unwrap_or_else(|| self.today());
        let raw = self
            .session
            .with_session(Capability::CrossSection, |p| async move {
                p.fetch_cross_section(codes, fields, as_of).await
            })
            .await?;
        normalize_cross_section(raw)
    }
}
