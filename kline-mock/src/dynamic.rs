use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use kline_core::{
    MarketDataProvider, ProviderError, QueryWindow, RawCrossSectionResponse, RawTabularResponse,
};

/// Instruction for how a method should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping for the given duration.
    ReturnAfter(Duration, T),
    /// Fail immediately with the provided error.
    Fail(ProviderError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, ProviderError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::ReturnAfter(delay, v) => {
                tokio::time::sleep(delay).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

struct InternalState {
    connect: MockBehavior<()>,
    disconnect: MockBehavior<()>,
    series_rules: HashMap<String, MockBehavior<RawTabularResponse>>,
    snapshot: Option<MockBehavior<RawCrossSectionResponse>>,
    cross_section: Option<MockBehavior<RawCrossSectionResponse>>,
    calendar: Option<MockBehavior<Vec<NaiveDate>>>,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            connect: MockBehavior::Return(()),
            disconnect: MockBehavior::Return(()),
            series_rules: HashMap::new(),
            snapshot: None,
            cross_section: None,
            calendar: None,
        }
    }
}

#[derive(Default)]
struct Counters {
    connected: AtomicBool,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

// Decrements the in-flight count even when the fetch future is dropped.
struct InFlight<'a>(&'a Counters);

impl<'a> InFlight<'a> {
    fn enter(c: &'a Counters) -> Self {
        c.fetches.fetch_add(1, Ordering::SeqCst);
        let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        c.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    is_connected_error: Arc<std::sync::Mutex<Option<ProviderError>>>,
    counters: Arc<Counters>,
}

impl DynamicMockController {
    /// Set the behavior of `connect`.
    pub async fn set_connect_behavior(&self, behavior: MockBehavior<()>) {
        self.state.lock().await.connect = behavior;
    }

    /// Set the behavior of `disconnect`.
    pub async fn set_disconnect_behavior(&self, behavior: MockBehavior<()>) {
        self.state.lock().await.disconnect = behavior;
    }

    /// Make `is_connected` fail with `err` (or succeed again with `None`).
    pub fn set_is_connected_error(&self, err: Option<ProviderError>) {
        *self
            .is_connected_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = err;
    }

    /// Set the behavior of `fetch_series` for one security code.
    pub async fn set_series_behavior(
        &self,
        code: impl Into<String>,
        behavior: MockBehavior<RawTabularResponse>,
    ) {
        self.state
            .lock()
            .await
            .series_rules
            .insert(code.into(), behavior);
    }

    /// Set the behavior of `fetch_snapshot`.
    pub async fn set_snapshot_behavior(&self, behavior: MockBehavior<RawCrossSectionResponse>) {
        self.state.lock().await.snapshot = Some(behavior);
    }

    /// Set the behavior of `fetch_cross_section`.
    pub async fn set_cross_section_behavior(
        &self,
        behavior: MockBehavior<RawCrossSectionResponse>,
    ) {
        self.state.lock().await.cross_section = Some(behavior);
    }

    /// Set the behavior of `fetch_calendar`.
    pub async fn set_calendar_behavior(&self, behavior: MockBehavior<Vec<NaiveDate>>) {
        self.state.lock().await.calendar = Some(behavior);
    }

    /// Simulate the vendor dropping the connection on its side.
    pub fn drop_connection(&self) {
        self.counters.connected.store(false, Ordering::SeqCst);
    }

    /// Simulate another owner of the vendor handle bringing it up.
    pub fn connect_externally(&self) {
        self.counters.connected.store(true, Ordering::SeqCst);
    }

    /// Number of `connect` calls, successful or not.
    #[must_use]
    pub fn connect_calls(&self) -> usize {
        self.counters.connects.load(Ordering::SeqCst)
    }

    /// Number of `disconnect` calls, successful or not.
    #[must_use]
    pub fn disconnect_calls(&self) -> usize {
        self.counters.disconnects.load(Ordering::SeqCst)
    }

    /// Number of fetch calls across all capabilities.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.counters.fetches.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed running at the same time.
    #[must_use]
    pub fn max_concurrent_fetches(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    /// Reset every scripted behavior to its default.
    pub async fn clear_all_behaviors(&self) {
        *self.state.lock().await = InternalState::default();
        self.set_is_connected_error(None);
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Unscripted fetches fail with code `-1`.
pub struct DynamicMockProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    is_connected_error: Arc<std::sync::Mutex<Option<ProviderError>>>,
    counters: Arc<Counters>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn MarketDataProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let is_connected_error = Arc::new(std::sync::Mutex::new(None));
        let counters = Arc::new(Counters::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            is_connected_error: Arc::clone(&is_connected_error),
            counters: Arc::clone(&counters),
        };
        let me = Arc::new(Self {
            name,
            state,
            is_connected_error,
            counters,
        });
        (me as Arc<dyn MarketDataProvider>, controller)
    }

    fn unscripted<T>(what: &str) -> MockBehavior<T> {
        MockBehavior::Fail(ProviderError::new(-1, format!("no behavior scripted for {what}")))
    }
}

#[async_trait]
impl MarketDataProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn connect(&self, _timeout: Duration) -> Result<(), ProviderError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = self.state.lock().await.connect.clone();
        behavior.run().await?;
        self.counters.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
        self.counters.connected.store(false, Ordering::SeqCst);
        let behavior = self.state.lock().await.disconnect.clone();
        behavior.run().await
    }

    fn is_connected(&self) -> Result<bool, ProviderError> {
        let scripted = self
            .is_connected_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match scripted {
            Some(e) => Err(e),
            None => Ok(self.counters.connected.load(Ordering::SeqCst)),
        }
    }

    async fn fetch_series(
        &self,
        code: &str,
        _fields: &[String],
        _window: &QueryWindow,
    ) -> Result<RawTabularResponse, ProviderError> {
        let _guard = InFlight::enter(&self.counters);
        let behavior = self
            .state
            .lock()
            .await
            .series_rules
            .get(code)
            .cloned()
            .unwrap_or_else(|| Self::unscripted(&format!("series '{code}'")));
        behavior.run().await
    }

    async fn fetch_snapshot(
        &self,
        _codes: &[String],
        _fields: &[String],
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        let _guard = InFlight::enter(&self.counters);
        let behavior = self
            .state
            .lock()
            .await
            .snapshot
            .clone()
            .unwrap_or_else(|| Self::unscripted("snapshot"));
        behavior.run().await
    }

    async fn fetch_calendar(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
        _exchange: &str,
    ) -> Result<Vec<NaiveDate>, ProviderError> {
        let _guard = InFlight::enter(&self.counters);
        let behavior = self
            .state
            .lock()
            .await
            .calendar
            .clone()
            .unwrap_or_else(|| Self::unscripted("calendar"));
        behavior.run().await
    }

    async fn fetch_cross_section(
        &self,
        _codes: &[String],
        _fields: &[String],
        _as_of: NaiveDate,
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        let _guard = InFlight::enter(&self.counters);
        let behavior = self
            .state
            .lock()
            .await
            .cross_section
            .clone()
            .unwrap_or_else(|| Self::unscripted("cross-section"));
        behavior.run().await
    }
}
