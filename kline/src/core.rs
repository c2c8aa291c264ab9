use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};

use kline_core::{KlineConfig, KlineError, MarketDataProvider};

use crate::session::ProviderSession;

/// Client facade over a single market data provider.
///
/// Cloning is cheap; clones share the same [`ProviderSession`] and therefore
/// the same connection.
#[derive(Clone, Debug)]
pub struct Kline {
    pub(crate) session: Arc<ProviderSession>,
    pub(crate) cfg: KlineConfig,
}

/// Builder for constructing a [`Kline`] facade.
pub struct KlineBuilder {
    provider: Option<Arc<dyn MarketDataProvider>>,
    cfg: KlineConfig,
}

impl Default for KlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KlineBuilder {
    /// Create a builder with [`KlineConfig::default`] and no provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: KlineConfig::default(),
        }
    }

    /// Set the market data provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: KlineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Upper bound for a single connection attempt (default 120s).
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.connect_timeout = timeout;
        self
    }

    /// Upper bound for a single provider operation (default: unbounded).
    ///
    /// An operation that runs past this limit fails with `ProviderTimeout` and
    /// resets the session.
    #[must_use]
    pub const fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.operation_timeout = Some(timeout);
        self
    }

    /// Fields requested by [`Kline::kline`].
    #[must_use]
    pub fn default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Fields requested by [`Kline::quote`].
    #[must_use]
    pub fn default_realtime_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.default_realtime_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Exchange used by [`Kline::trading_days`] when the caller names none.
    #[must_use]
    pub fn default_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.cfg.default_exchange = exchange.into();
        self
    }

    /// Timezone in which "today" and "now" are evaluated (default `Asia/Shanghai`).
    #[must_use]
    pub const fn timezone(mut self, tz: chrono_tz::Tz) -> Self {
        self.cfg.timezone = tz;
        self
    }

    /// Build the facade.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider was set via [`with_provider`](Self::with_provider)
    /// or if either default field list is empty.
    pub fn build(self) -> Result<Kline, KlineError> {
        let Some(provider) = self.provider else {
            return Err(KlineError::InvalidArg(
                "no provider registered; set one via with_provider(...)".to_string(),
            ));
        };
        if self.cfg.default_fields.is_empty() || self.cfg.default_realtime_fields.is_empty() {
            return Err(KlineError::InvalidArg(
                "default field list must not be empty".to_string(),
            ));
        }
        let session = ProviderSession::new(
            provider,
            self.cfg.connect_timeout,
            self.cfg.operation_timeout,
        );
        Ok(Kline {
            session: Arc::new(session),
            cfg: self.cfg,
        })
    }
}

impl Kline {
    /// Start building a new `Kline` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let kline = kline::Kline::builder()
    ///     .with_provider(Arc::new(MyWindAdapter::new()))
    ///     .operation_timeout(Duration::from_secs(30))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> KlineBuilder {
        KlineBuilder::new()
    }

    /// The shared provider session.
    #[must_use]
    pub const fn session(&self) -> &Arc<ProviderSession> {
        &self.session
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &KlineConfig {
        &self.cfg
    }

    /// Ask the provider whether its connection is up; `false` on any provider error.
    #[must_use]
    pub fn check_connection(&self) -> bool {
        self.session.check_connection()
    }

    /// Close the provider connection if open. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        self.session.shutdown().await;
    }

    /// Wall-clock time in the configured timezone.
    pub(crate) fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.cfg.timezone).naive_local()
    }

    /// Calendar date in the configured timezone.
    pub(crate) fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
