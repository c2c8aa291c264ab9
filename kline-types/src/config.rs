//! Configuration types shared by the facade and the indicator engine.
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global configuration for the `Kline` facade and its provider session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineConfig {
    /// Upper bound for a single connection attempt.
    pub connect_timeout: Duration,
    /// Optional upper bound for a single provider operation.
    ///
    /// A timed-out operation is treated like any other failure: the session is
    /// torn down and the next call reconnects.
    pub operation_timeout: Option<Duration>,
    /// Fields requested by `kline` when the caller does not name any.
    pub default_fields: Vec<String>,
    /// Fields requested by `quote`.
    pub default_realtime_fields: Vec<String>,
    /// Exchange calendar used by `trading_days` when none is given.
    pub default_exchange: String,
    /// Timezone in which "today" and "now" are evaluated.
    pub timezone: chrono_tz::Tz,
}

impl Default for KlineConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(120),
            operation_timeout: None,
            default_fields: ["open", "high", "low", "close", "volume"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_realtime_fields: ["rt_last", "rt_vol", "rt_amt", "rt_chg", "rt_pct_chg"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_exchange: "SSE".to_string(),
            timezone: chrono_tz::Asia::Shanghai,
        }
    }
}

/// Parameters of the standard indicator bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Simple moving average periods; each yields an `ma{period}` column.
    pub ma_periods: Vec<usize>,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// MACD signal EMA period.
    pub macd_signal: usize,
    /// RSI look-back period.
    pub rsi_period: usize,
    /// Bollinger band period.
    pub bollinger_period: usize,
    /// Bollinger band width in standard deviations.
    pub bollinger_k: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20, 60],
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}
