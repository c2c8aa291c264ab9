//! Lifecycle of the single shared provider connection.
//!
//! ```text
//! Disconnected --ensure_connected--> Connecting --ok--> Connected
//!      ^                                 |                  |
//!      |<------- connect error/timeout --+                  | operation error/timeout
//!      |                                                    v
//!      +<---------------- best-effort teardown ---------- Faulted
//! ```
//!
//! All transitions happen while holding one `tokio::sync::Mutex`, which is kept
//! for the whole of [`ProviderSession::with_session`]: connect, operation, and
//! teardown never interleave between callers.
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use kline_core::{Capability, KlineError, MarketDataProvider, ProviderError};

/// Observable state of the provider connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnectionState {
    /// No connection; the next operation connects.
    Disconnected = 0,
    /// A connection attempt is in flight.
    Connecting = 1,
    /// The provider accepted the connection.
    Connected = 2,
    /// An operation failed and teardown is in progress.
    Faulted = 3,
}

impl ConnectionState {
    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Faulted,
            _ => Self::Disconnected,
        }
    }
}

/// Owner of the provider handle and its connection state.
///
/// Construct once and share behind an `Arc`; every clone of a `Kline` facade
/// built from the same builder goes through the same session.
pub struct ProviderSession {
    provider: Arc<dyn MarketDataProvider>,
    guard: Mutex<ConnectionState>,
    // Mirror of `guard` for lock-free snapshots.
    observed: AtomicU8,
    connect_timeout: Duration,
    operation_timeout: Option<Duration>,
}

impl ProviderSession {
    /// Create a disconnected session. Nothing is sent to the provider until first use.
    #[must_use]
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        connect_timeout: Duration,
        operation_timeout: Option<Duration>,
    ) -> Self {
        Self {
            provider,
            guard: Mutex::new(ConnectionState::Disconnected),
            observed: AtomicU8::new(ConnectionState::Disconnected as u8),
            connect_timeout,
            operation_timeout,
        }
    }

    /// Current connection state as last recorded by the session.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.observed.load(Ordering::Acquire))
    }

    /// Name of the underlying provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Timeout applied to connection attempts made by [`with_session`](Self::with_session).
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    fn transition(&self, slot: &mut ConnectionState, next: ConnectionState) {
        *slot = next;
        self.observed.store(next as u8, Ordering::Release);
    }

    /// Connect unless already connected, waiting at most `timeout`.
    ///
    /// # Errors
    /// Returns `Connection` carrying the vendor code when the provider rejects the
    /// attempt, or with no code when the attempt times out.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "kline::session::ensure_connected",
            skip(self),
            fields(provider = self.provider.name()),
        )
    )]
    pub async fn ensure_connected(&self, timeout: Duration) -> Result<(), KlineError> {
        let mut slot = self.guard.lock().await;
        self.connect_locked(&mut slot, timeout).await
    }

    async fn connect_locked(
        &self,
        slot: &mut ConnectionState,
        timeout: Duration,
    ) -> Result<(), KlineError> {
        let name = self.provider.name();
        if *slot == ConnectionState::Connected {
            match self.provider.is_connected() {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = name, "provider dropped the connection; reconnecting");
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = name, error = %_e, "liveness check failed; reconnecting");
                }
            }
            self.transition(slot, ConnectionState::Disconnected);
        }

        self.transition(slot, ConnectionState::Connecting);
        #[cfg(feature = "tracing")]
        tracing::info!(
            provider = name,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "connecting"
        );

        match tokio::time::timeout(timeout, self.provider.connect(timeout)).await {
            Ok(Ok(())) => {
                self.transition(slot, ConnectionState::Connected);
                #[cfg(feature = "tracing")]
                tracing::info!(provider = name, "connected");
                Ok(())
            }
            Ok(Err(ProviderError { code, message })) => {
                self.transition(slot, ConnectionState::Disconnected);
                #[cfg(feature = "tracing")]
                tracing::warn!(provider = name, code, error = %message, "connect rejected");
                Err(KlineError::connection(name, Some(code), message))
            }
            Err(_) => {
                self.transition(slot, ConnectionState::Disconnected);
                #[cfg(feature = "tracing")]
                tracing::warn!(provider = name, "connect timed out");
                Err(KlineError::connection(
                    name,
                    None,
                    format!("no answer within {}ms", timeout.as_millis()),
                ))
            }
        }
    }

    /// Disconnect, logging and discarding any error. Leaves the slot `Disconnected`.
    async fn teardown_locked(&self, slot: &mut ConnectionState) {
        match tokio::time::timeout(self.connect_timeout, self.provider.disconnect()).await {
            Ok(Ok(())) => {
                #[cfg(feature = "tracing")]
                tracing::info!(provider = self.provider.name(), "disconnected");
            }
            Ok(Err(_e)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = self.provider.name(), error = %_e, "ignoring disconnect error");
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = self.provider.name(), "ignoring disconnect timeout");
            }
        }
        self.transition(slot, ConnectionState::Disconnected);
    }

    /// Run `op` against a connected provider.
    ///
    /// The session lock is held for the entire call. When `op` fails or exceeds
    /// the operation timeout the connection is torn down (errors during teardown
    /// are swallowed) and the original error is returned; the next call
    /// reconnects from scratch.
    ///
    /// # Errors
    /// - `Connection` if connecting fails.
    /// - `Provider` tagged with `capability` if `op` fails.
    /// - `ProviderTimeout` if `op` exceeds the operation timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "kline::session::with_session",
            skip(self, op, capability),
            fields(provider = self.provider.name(), capability = %capability),
        )
    )]
    pub async fn with_session<T, F, Fut>(&self, capability: Capability, op: F) -> Result<T, KlineError>
    where
        F: FnOnce(Arc<dyn MarketDataProvider>) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let name = self.provider.name();
        let mut slot = self.guard.lock().await;
        self.connect_locked(&mut slot, self.connect_timeout).await?;

        let call = async {
            op(Arc::clone(&self.provider))
                .await
                .map_err(|e| e.into_kline(name, capability.as_str()))
        };
        let outcome = match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(KlineError::provider_timeout(name, capability.as_str()))),
            None => call.await,
        };

        if let Err(_e) = &outcome {
            self.transition(&mut slot, ConnectionState::Faulted);
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = name, error = %_e, "operation failed; resetting session");
            self.teardown_locked(&mut slot).await;
        }
        outcome
    }

    /// Ask the provider whether it is connected. Never fails: errors read as `false`.
    #[must_use]
    pub fn check_connection(&self) -> bool {
        match self.provider.is_connected() {
            Ok(up) => up,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = self.provider.name(), error = %_e, "liveness check failed");
                false
            }
        }
    }

    /// Disconnect if a connection is open. Idempotent; errors are swallowed.
    ///
    /// The provider handle may be up even when the session recorded
    /// `Disconnected` (a connect that finished after its timeout, or another
    /// owner of the handle), so the provider is asked before giving up.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "kline::session::shutdown",
            skip(self),
            fields(provider = self.provider.name()),
        )
    )]
    pub async fn shutdown(&self) {
        let mut slot = self.guard.lock().await;
        let open = *slot != ConnectionState::Disconnected
            || matches!(self.provider.is_connected(), Ok(true));
        if open {
            self.teardown_locked(&mut slot).await;
        }
    }
}

impl std::fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSession")
            .field("provider", &self.provider.name())
            .field("state", &self.state())
            .field("connect_timeout", &self.connect_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}
