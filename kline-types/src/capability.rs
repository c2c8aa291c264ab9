use core::fmt;
use serde::{Deserialize, Serialize};

/// Provider capability labels used for errors, timeouts, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical date-indexed series.
    Series,
    /// Realtime snapshot across securities.
    Snapshot,
    /// Exchange trading calendar.
    Calendar,
    /// Fundamentals cross-section as of a date.
    CrossSection,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Snapshot => "snapshot",
            Self::Calendar => "calendar",
            Self::CrossSection => "cross-section",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
