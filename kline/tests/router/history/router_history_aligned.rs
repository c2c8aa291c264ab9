use kline::{KlineError, resolve_window};
use kline_mock::MockBehavior;

use crate::helpers::{PINGAN, PUFA, d, dynamic_kline, raw_closes, strings};

#[tokio::test]
async fn aligned_history_outer_joins_codes() {
    let (k, ctl) = dynamic_kline();
    ctl.set_series_behavior(
        PUFA,
        MockBehavior::Return(raw_closes(&[("2024-01-02", 10.0), ("2024-01-03", 10.1)])),
    )
    .await;
    ctl.set_series_behavior(
        PINGAN,
        MockBehavior::Return(raw_closes(&[("2024-01-03", 9.0), ("2024-01-04", 9.2)])),
    )
    .await;

    let window = resolve_window("D", 5, d(2024, 1, 5)).unwrap();
    let s = k
        .history_aligned(&strings(&[PUFA, PINGAN]), &strings(&["close"]), &window)
        .await
        .unwrap();
    assert_eq!(s.axis(), &[d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]);
    assert_eq!(
        s.column("600000.SH.close").unwrap(),
        vec![Some(10.0), Some(10.1), None]
    );
    assert_eq!(
        s.column("000001.SZ.close").unwrap(),
        vec![None, Some(9.0), Some(9.2)]
    );
}

#[tokio::test]
async fn aligned_history_requires_codes() {
    let (k, _ctl) = dynamic_kline();
    let window = resolve_window("D", 5, d(2024, 1, 5)).unwrap();
    let err = k
        .history_aligned(&[], &strings(&["close"]), &window)
        .await
        .unwrap_err();
    assert!(matches!(err, KlineError::InvalidArg(_)));
}
