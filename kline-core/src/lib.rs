//! kline-core
//!
//! Provider contract and the pure data pipeline shared across the kline crates.
//!
//! - `provider`: the `MarketDataProvider` trait a vendor SDK adapter implements.
//! - `dates`: date-string validation, standardization, and weekday arithmetic.
//! - `window`: timeframe code + look-back count to a concrete `QueryWindow`.
//! - `timeseries`: normalization of raw provider payloads, range filtering, alignment.
//! - `indicators`: moving averages, MACD, RSI, Bollinger bands.
//!
//! Everything except the provider trait is a pure function over immutable
//! values and can be called from any number of tasks concurrently.
#![warn(missing_docs)]

/// Date utilities.
pub mod dates;
/// Technical indicators over a normalized series.
pub mod indicators;
/// The market data provider contract.
pub mod provider;
/// Series normalization, filtering, and alignment.
pub mod timeseries;
/// Query window resolution.
pub mod window;

pub use provider::MarketDataProvider;
pub use timeseries::{align, filter_by_range, normalize, normalize_calendar, normalize_cross_section};
pub use window::{resolve_window, resolve_window_at};

pub use kline_types::*;
