//! Value types shared by the kline crates.
//!
//! Nothing in here talks to a provider. The types carry their invariants in
//! their constructors so that downstream code can rely on them:
//!
//! - [`QueryWindow`]: a validated `(start, end, granularity, adjustment)` request window.
//! - [`TimeSeries`]: a date-indexed numeric table with a strictly ascending axis.
//! - [`CrossSection`]: a code-indexed numeric table for snapshots and fundamentals.
//! - [`KlineError`] / [`ProviderError`]: the error taxonomy.
#![warn(missing_docs)]

mod capability;
mod config;
mod cross_section;
mod error;
mod raw;
mod series;
mod window;

pub use capability::Capability;
pub use config::{IndicatorConfig, KlineConfig};
pub use cross_section::CrossSection;
pub use error::{KlineError, ProviderError};
pub use raw::{RawCrossSectionResponse, RawTabularResponse};
pub use series::TimeSeries;
pub use window::{AdjustmentMode, Granularity, QueryWindow};

/// A single cell of a [`TimeSeries`] or [`CrossSection`]; `None` marks a missing value.
pub type Cell = Option<f64>;
