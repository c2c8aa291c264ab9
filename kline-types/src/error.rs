use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the kline workspace.
///
/// Input errors (`InvalidTimeframe`, `InvalidDate`, `InvalidArg`, `MissingField`) are
/// raised eagerly and are never worth retrying. Provider-side failures carry the
/// provider name and, where the vendor supplied one, its numeric error code.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KlineError {
    /// Establishing the provider connection failed or timed out.
    #[error("{provider} connection failed: {msg}")]
    Connection {
        /// Provider name.
        provider: String,
        /// Vendor error code, absent when the attempt timed out.
        code: Option<i32>,
        /// Human-readable error message.
        msg: String,
    },

    /// A provider call returned a non-zero error code.
    #[error("{provider} {capability} failed with code {code}: {msg}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Capability label of the failed call (e.g. "series").
        capability: String,
        /// Vendor error code.
        code: i32,
        /// Human-readable error message.
        msg: String,
    },

    /// A provider call exceeded the configured operation timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider name.
        provider: String,
        /// Capability label of the call that timed out.
        capability: String,
    },

    /// The provider returned structurally invalid data.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The timeframe code is not `D`, `W`, `M`, or a positive minute count.
    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),

    /// A date string could not be interpreted as a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A required field is absent from the series.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl KlineError {
    /// Helper: build a `Connection` error.
    pub fn connection(provider: impl Into<String>, code: Option<i32>, msg: impl Into<String>) -> Self {
        Self::Connection {
            provider: provider.into(),
            code,
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Helper: build a `MissingField` error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Returns true if the same call may succeed later without changing its inputs.
    ///
    /// Connection, provider, and timeout failures are transient from the caller's
    /// point of view; malformed data and input errors are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Provider { .. } | Self::ProviderTimeout { .. }
        )
    }

    /// Returns the vendor error code carried by this error, if any.
    #[must_use]
    pub const fn vendor_code(&self) -> Option<i32> {
        match self {
            Self::Connection { code, .. } => *code,
            Self::Provider { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Failure reported by a market data provider.
///
/// Vendors signal success with code `0`; any failure carries a non-zero code.
/// The code is kept verbatim so callers can match vendor documentation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    /// Non-zero vendor error code.
    pub code: i32,
    /// Vendor-supplied description.
    pub message: String,
}

impl ProviderError {
    /// Build a provider error. A zero code is coerced to `-1` since zero means success.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: if code == 0 { -1 } else { code },
            message: message.into(),
        }
    }

    /// Attach provider and capability context, producing a [`KlineError::Provider`].
    pub fn into_kline(self, provider: impl Into<String>, capability: impl Into<String>) -> KlineError {
        KlineError::Provider {
            provider: provider.into(),
            capability: capability.into(),
            code: self.code,
            msg: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_code_is_never_reported_as_failure_code() {
        let e = ProviderError::new(0, "odd vendor");
        assert_eq!(e.code, -1);
    }

    #[test]
    fn retryable_classification() {
        assert!(KlineError::connection("wind", Some(-2), "down").is_retryable());
        assert!(KlineError::provider_timeout("wind", "series").is_retryable());
        assert!(!KlineError::malformed("bad rows").is_retryable());
        assert!(!KlineError::InvalidTimeframe("X".into()).is_retryable());
    }

    #[test]
    fn provider_error_keeps_vendor_code() {
        let e = ProviderError::new(-40_520_007, "no data").into_kline("wind", "series");
        assert_eq!(e.vendor_code(), Some(-40_520_007));
        assert!(matches!(e, KlineError::Provider { ref capability, .. } if capability == "series"));
    }
}
