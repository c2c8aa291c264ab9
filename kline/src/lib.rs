//! kline acquires security price and fundamental data from a market data
//! provider and hands it back as validated, date-indexed tables.
//!
//! Overview
//! - One provider connection per [`ProviderSession`], opened lazily on first use
//!   and torn down on any failed operation so the next call starts clean.
//! - Calls are serialized through the session; the facade adds input checks,
//!   window resolution, and normalization of the provider's parallel arrays.
//! - The pure pipeline (dates, windows, normalization, indicators) lives in
//!   `kline_core` and is re-exported here.
//!
//! Fetching a daily k-line and decorating it with indicators:
//! ```rust,ignore
//! use std::sync::Arc;
//! use kline::{IndicatorConfig, Kline, indicators};
//!
//! let kline = Kline::builder()
//!     .with_provider(Arc::new(MyWindAdapter::new()))
//!     .build()?;
//! let bars = kline.kline("600000.SH", "D", 120).await?;
//! let rich = indicators::apply(&bars, &IndicatorConfig::default())?;
//! println!("{}", serde_json::to_string(&rich.to_records())?);
//! kline.shutdown().await;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;
/// Provider connection lifecycle.
pub mod session;

pub use crate::core::{Kline, KlineBuilder};
pub use session::{ConnectionState, ProviderSession};

pub use kline_core::{dates, indicators};
pub use kline_core::{
    AdjustmentMode, Capability, Cell, CrossSection, Granularity, IndicatorConfig, KlineConfig,
    KlineError, MarketDataProvider, ProviderError, QueryWindow, RawCrossSectionResponse,
    RawTabularResponse, TimeSeries, align, filter_by_range, normalize, normalize_calendar,
    normalize_cross_section, resolve_window, resolve_window_at,
};
