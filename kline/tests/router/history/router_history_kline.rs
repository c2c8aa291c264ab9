use std::sync::Arc;

use chrono::Utc;
use kline::{Granularity, Kline, KlineError, indicators};

use crate::helpers::{PUFA, RecordingProvider, fixture_kline};

#[tokio::test]
async fn kline_resolves_window_from_now_in_configured_tz() {
    let p = Arc::new(RecordingProvider::default());
    let k = Kline::builder()
        .with_provider(p.clone())
        .timezone(chrono_tz::Asia::Shanghai)
        .build()
        .unwrap();

    let before = Utc::now().with_timezone(&chrono_tz::Asia::Shanghai).date_naive();
    k.kline(PUFA, "W", 4).await.unwrap();
    let after = Utc::now().with_timezone(&chrono_tz::Asia::Shanghai).date_naive();

    let calls = p.windows.lock().unwrap();
    let (code, fields, window) = &calls[0];
    assert_eq!(code, PUFA);
    assert_eq!(fields, &k.config().default_fields);
    assert_eq!(window.granularity(), Granularity::Weekly);
    assert!(window.end() == before || window.end() == after);
    assert_eq!((window.end() - window.start()).num_days(), 28);
}

#[tokio::test]
async fn kline_rejects_unknown_timeframe() {
    let k = fixture_kline();
    let err = k.kline(PUFA, "Q", 10).await.unwrap_err();
    assert_eq!(err, KlineError::InvalidTimeframe("Q".into()));
}

#[tokio::test]
async fn kline_feeds_indicator_bundle() {
    let k = fixture_kline();
    let bars = k.kline(PUFA, "D", 200).await.unwrap();
    assert!(bars.len() > 100);
    assert_eq!(bars.fields(), k.config().default_fields.as_slice());

    let rich = indicators::apply(&bars, &kline::IndicatorConfig::default()).unwrap();
    let rich = indicators::returns(&rich, "close").unwrap();
    let last = rich.len() - 1;
    for name in ["ma5", "ma60", "macd", "rsi", "boll_upper", "close_return"] {
        let col = rich.column(name).unwrap();
        assert!(col[last].is_some(), "{name} undefined on last row");
    }
    let records = rich.to_records();
    assert_eq!(records.len(), rich.len());
    assert!(records[0]["ma5"].is_null());
}
