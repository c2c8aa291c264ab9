use std::sync::Arc;

use kline::{Kline, KlineError};
use kline_mock::MockBehavior;

use crate::helpers::{RecordingProvider, d, dynamic_kline, fixture_kline};

#[tokio::test]
async fn trading_days_from_provider_calendar() {
    let k = fixture_kline();
    let days = k
        .trading_days(d(2024, 2, 5), Some(d(2024, 2, 19)), None)
        .await
        .unwrap();
    assert_eq!(
        days,
        vec![
            d(2024, 2, 5),
            d(2024, 2, 6),
            d(2024, 2, 7),
            d(2024, 2, 8),
            d(2024, 2, 19),
        ]
    );
}

#[tokio::test]
async fn trading_days_defaults() {
    let p = Arc::new(RecordingProvider::default());
    let k = Kline::builder()
        .with_provider(p.clone())
        .default_exchange("SZSE")
        .build()
        .unwrap();
    k.trading_days(d(2024, 1, 1), None, None).await.unwrap();
    k.trading_days(d(2024, 1, 1), Some(d(2024, 1, 31)), Some("SSE"))
        .await
        .unwrap();

    let calls = p.calendars.lock().unwrap();
    assert_eq!(calls[0].2, "SZSE");
    assert!(calls[0].1 >= d(2024, 1, 1));
    assert_eq!(calls[1], (d(2024, 1, 1), d(2024, 1, 31), "SSE".to_string()));
}

#[tokio::test]
async fn provider_calendar_is_sorted_deduped_and_clipped() {
    let (k, ctl) = dynamic_kline();
    ctl.set_calendar_behavior(MockBehavior::Return(vec![
        d(2024, 1, 4),
        d(2024, 1, 2),
        d(2024, 1, 4),
        d(2023, 12, 29),
    ]))
    .await;
    let days = k
        .trading_days(d(2024, 1, 1), Some(d(2024, 1, 5)), None)
        .await
        .unwrap();
    assert_eq!(days, vec![d(2024, 1, 2), d(2024, 1, 4)]);
}

#[tokio::test]
async fn inverted_range_is_invalid() {
    let (k, ctl) = dynamic_kline();
    let err = k
        .trading_days(d(2024, 1, 5), Some(d(2024, 1, 1)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, KlineError::InvalidArg(_)));
    assert_eq!(ctl.connect_calls(), 0);
}
