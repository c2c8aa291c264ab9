use kline::{ConnectionState, KlineError, resolve_window};
use kline_mock::MockBehavior;

use crate::helpers::{PUFA, d, dynamic_kline, fixture_kline, raw_closes, strings};

#[tokio::test]
async fn history_normalizes_and_clips_to_window() {
    let (k, ctl) = dynamic_kline();
    ctl.set_series_behavior(
        PUFA,
        MockBehavior::Return(raw_closes(&[
            ("2024/01/05", 10.5),
            ("20240103", 10.2),
            ("2023-12-29", 9.0),
            ("2024-01-04", 10.4),
        ])),
    )
    .await;

    let window = resolve_window("D", 3, d(2024, 1, 5)).unwrap();
    let s = k.history(PUFA, &strings(&["close"]), &window).await.unwrap();
    assert_eq!(s.axis(), &[d(2024, 1, 3), d(2024, 1, 4), d(2024, 1, 5)]);
    assert_eq!(
        s.column("close").unwrap(),
        vec![Some(10.2), Some(10.4), Some(10.5)]
    );
}

#[tokio::test]
async fn malformed_payload_is_reported_without_reset() {
    let (k, ctl) = dynamic_kline();
    let mut raw = raw_closes(&[("2024-01-02", 1.0)]);
    raw.rows.push(vec![Some(2.0)]);
    ctl.set_series_behavior(PUFA, MockBehavior::Return(raw)).await;

    let window = resolve_window("D", 3, d(2024, 1, 5)).unwrap();
    let err = k.history(PUFA, &strings(&["close"]), &window).await.unwrap_err();
    assert!(matches!(err, KlineError::MalformedResponse(_)));
    assert_eq!(k.session().state(), ConnectionState::Connected);
}

#[tokio::test]
async fn empty_inputs_are_rejected_before_connecting() {
    let (k, ctl) = dynamic_kline();
    let window = resolve_window("D", 3, d(2024, 1, 5)).unwrap();
    assert!(matches!(
        k.history("", &strings(&["close"]), &window).await,
        Err(KlineError::InvalidArg(_))
    ));
    assert!(matches!(
        k.history(PUFA, &[], &window).await,
        Err(KlineError::InvalidArg(_))
    ));
    assert_eq!(ctl.connect_calls(), 0);
}

#[tokio::test]
async fn provider_failure_surfaces_with_code() {
    let k = fixture_kline();
    let window = resolve_window("D", 3, d(2024, 1, 5)).unwrap();
    let err = k.history("FAIL", &strings(&["close"]), &window).await.unwrap_err();
    assert_eq!(err.vendor_code(), Some(kline_mock::FORCED_FAILURE_CODE));
    assert_eq!(k.session().state(), ConnectionState::Disconnected);

    // the next call reconnects and succeeds
    let s = k.history(PUFA, &strings(&["close"]), &window).await.unwrap();
    assert!(!s.is_empty());
}
