use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use kline::{
    MarketDataProvider, ProviderError, QueryWindow, RawCrossSectionResponse, RawTabularResponse,
};

/// Provider that remembers the arguments of every call and answers with empty payloads.
#[derive(Default)]
pub struct RecordingProvider {
    pub windows: Mutex<Vec<(String, Vec<String>, QueryWindow)>>,
    pub calendars: Mutex<Vec<(NaiveDate, NaiveDate, String)>>,
    pub as_of: Mutex<Vec<NaiveDate>>,
}

#[async_trait]
impl MarketDataProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn connect(&self, _timeout: Duration) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn is_connected(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }

    async fn fetch_series(
        &self,
        code: &str,
        fields: &[String],
        window: &QueryWindow,
    ) -> Result<RawTabularResponse, ProviderError> {
        self.windows
            .lock()
            .unwrap()
            .push((code.to_string(), fields.to_vec(), window.clone()));
        Ok(RawTabularResponse {
            fields: fields.to_vec(),
            ..Default::default()
        })
    }

    async fn fetch_snapshot(
        &self,
        codes: &[String],
        fields: &[String],
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        Ok(RawCrossSectionResponse {
            codes: codes.to_vec(),
            fields: fields.to_vec(),
            rows: vec![vec![None; fields.len()]; codes.len()],
        })
    }

    async fn fetch_calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exchange: &str,
    ) -> Result<Vec<NaiveDate>, ProviderError> {
        self.calendars
            .lock()
            .unwrap()
            .push((start, end, exchange.to_string()));
        Ok(vec![])
    }

    async fn fetch_cross_section(
        &self,
        codes: &[String],
        fields: &[String],
        as_of: NaiveDate,
    ) -> Result<RawCrossSectionResponse, ProviderError> {
        self.as_of.lock().unwrap().push(as_of);
        self.fetch_snapshot(codes, fields).await
    }
}
