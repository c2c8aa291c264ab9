use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::KlineError;

/// Sampling frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// One bar per day.
    Daily,
    /// One bar per week.
    Weekly,
    /// One bar per month.
    Monthly,
    /// Intraday bars of the given size in minutes (always > 0).
    IntradayMinutes(u32),
}

impl Granularity {
    /// Bar size in minutes for intraday granularities.
    #[must_use]
    pub const fn minutes(self) -> Option<u32> {
        match self {
            Self::IntradayMinutes(n) => Some(n),
            _ => None,
        }
    }
}

/// Renders the timeframe code: `D`, `W`, `M`, or the minute count.
impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("D"),
            Self::Weekly => f.write_str("W"),
            Self::Monthly => f.write_str("M"),
            Self::IntradayMinutes(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Granularity {
    type Err = KlineError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "D" => Ok(Self::Daily),
            "W" => Ok(Self::Weekly),
            "M" => Ok(Self::Monthly),
            other => match other.parse::<u32>() {
                Ok(n) if n > 0 => Ok(Self::IntradayMinutes(n)),
                _ => Err(KlineError::InvalidTimeframe(code.to_string())),
            },
        }
    }
}

/// Price adjustment applied by the provider for corporate actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AdjustmentMode {
    /// Forward-adjusted prices (adjusted looking forward from a base date).
    #[default]
    Forward,
    /// Backward-adjusted prices.
    Backward,
    /// Raw, unadjusted prices.
    None,
}

/// A concrete query window handed to the provider.
///
/// Invariant: `start <= end` and intraday bar sizes are positive. The fields are
/// private so that every instance went through [`QueryWindow::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryWindow {
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
    adjustment: AdjustmentMode,
}

impl QueryWindow {
    /// Build a window, validating its invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start > end`, and `InvalidTimeframe` for a zero-minute
    /// intraday granularity.
    pub fn try_new(
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
        adjustment: AdjustmentMode,
    ) -> Result<Self, KlineError> {
        if start > end {
            return Err(KlineError::InvalidArg(format!(
                "window start {start} is after end {end}"
            )));
        }
        if granularity == Granularity::IntradayMinutes(0) {
            return Err(KlineError::InvalidTimeframe("0".to_string()));
        }
        Ok(Self {
            start,
            end,
            granularity,
            adjustment,
        })
    }

    /// First date of the window (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the window (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Requested bar granularity.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Requested price adjustment.
    #[must_use]
    pub const fn adjustment(&self) -> AdjustmentMode {
        self.adjustment
    }
}
