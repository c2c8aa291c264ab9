use kline_core::{
    Capability, KlineError, QueryWindow, TimeSeries, align, filter_by_range, normalize,
    resolve_window_at,
};

use super::{require_code, require_codes, require_fields};
use crate::Kline;

impl Kline {
    /// Fetch a normalized historical series for one security.
    ///
    /// Rows the provider returns outside `window` are dropped. Gaps stay `None`.
    ///
    /// # Errors
    /// - `InvalidArg` for an empty code or field list.
    /// - Session errors (`Connection`, `Provider`, `ProviderTimeout`).
    /// - `MalformedResponse` if the payload violates the series invariants.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "kline::router::history",
            skip(self, code, fields, window),
            fields(
                code = %code,
                start = %window.start(),
                end = %window.end(),
                granularity = %window.granularity(),
            ),
        )
    )]
    pub async fn history(
        &self,
        code: &str,
        fields: &[String],
        window: &QueryWindow,
    ) -> Result<TimeSeries, KlineError> {
        require_code(code)?;
        require_fields(fields)?;
        let raw = self
            .session
            .with_session(Capability::Series, |p| async move {
                p.fetch_series(code, fields, window).await
            })
            .await?;
        let series = normalize(raw)?;
        Ok(filter_by_range(
            &series,
            Some(window.start()),
            Some(window.end()),
        ))
    }

    /// Fetch the k-line for `code` covering `limit` bars of `timeframe` back from now.
    ///
    /// `timeframe` is `D`, `W`, `M`, or a minute count such as `30`. "Now" is taken
    /// in the configured timezone and the configured default fields are requested.
    ///
    /// # Errors
    /// `InvalidTimeframe` for an unknown code, plus everything [`history`](Self::history) returns.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "kline::router::kline", skip(self))
    )]
    pub async fn kline(
        &self,
        code: &str,
        timeframe: &str,
        limit: u32,
    ) -> Result<TimeSeries, KlineError> {
        let window = resolve_window_at(timeframe, limit, self.now())?;
        self.history(code, &self.cfg.default_fields, &window).await
    }

    /// Fetch several securities over the same window and outer-join them on date.
    ///
    /// Field names shared between securities are prefixed with the code, e.g.
    /// `600000.SH.close`. Calls run one after another on the shared session.
    ///
    /// # Errors
    /// The first error from any [`history`](Self::history) call, or `InvalidArg`
    /// from alignment.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "kline::router::history_aligned",
            skip(self, codes, fields, window),
            fields(codes = codes.len()),
        )
    )]
    pub async fn history_aligned(
        &self,
        codes: &[String],
        fields: &[String],
        window: &QueryWindow,
    ) -> Result<TimeSeries, KlineError> {
        require_codes(codes)?;
        let mut fetched = Vec::with_capacity(codes.len());
        for code in codes {
            fetched.push((code.as_str(), self.history(code, fields, window).await?));
        }
        align(fetched.iter().map(|(code, s)| (*code, s)))
    }
}
