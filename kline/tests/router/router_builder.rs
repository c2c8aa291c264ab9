use std::time::Duration;

use kline::{Kline, KlineConfig, KlineError};

use crate::helpers::fixture_kline;

#[test]
fn build_without_provider_fails() {
    let err = Kline::builder().build().unwrap_err();
    assert!(matches!(err, KlineError::InvalidArg(_)));
}

#[test]
fn build_rejects_empty_default_fields() {
    let (p, _ctl) = kline_mock::DynamicMockProvider::new_with_controller("dyn");
    let err = Kline::builder()
        .with_provider(p)
        .default_fields(Vec::<String>::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, KlineError::InvalidArg(_)));
}

#[test]
fn build_rejects_empty_default_realtime_fields() {
    let (p, _ctl) = kline_mock::DynamicMockProvider::new_with_controller("dyn");
    let err = Kline::builder()
        .with_provider(p)
        .default_realtime_fields(Vec::<String>::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, KlineError::InvalidArg(_)));
}

#[test]
fn builder_overrides_reach_config() {
    let (p, _ctl) = kline_mock::DynamicMockProvider::new_with_controller("dyn");
    let k = Kline::builder()
        .with_provider(p)
        .connect_timeout(Duration::from_secs(7))
        .operation_timeout(Duration::from_secs(3))
        .default_fields(["close"])
        .default_exchange("SZSE")
        .timezone(chrono_tz::UTC)
        .build()
        .unwrap();
    let cfg = k.config();
    assert_eq!(cfg.connect_timeout, Duration::from_secs(7));
    assert_eq!(cfg.operation_timeout, Some(Duration::from_secs(3)));
    assert_eq!(cfg.default_fields, vec!["close".to_string()]);
    assert_eq!(cfg.default_exchange, "SZSE");
    assert_eq!(k.session().connect_timeout(), Duration::from_secs(7));
}

#[test]
fn defaults_match_vendor_conventions() {
    let cfg = fixture_kline().config().clone();
    assert_eq!(cfg, KlineConfig::default());
    assert_eq!(cfg.connect_timeout, Duration::from_secs(120));
    assert_eq!(cfg.default_exchange, "SSE");
    assert_eq!(cfg.timezone, chrono_tz::Asia::Shanghai);
}

#[tokio::test]
async fn clones_share_one_session() {
    let k = fixture_kline();
    let k2 = k.clone();
    assert!(!k.check_connection());
    k.session().ensure_connected(Duration::from_secs(1)).await.unwrap();
    assert!(k2.check_connection());
    k2.shutdown().await;
    assert!(!k.check_connection());
}
