use std::sync::Arc;

use kline::{Kline, KlineError};
use kline_mock::MockBehavior;

use crate::helpers::{
    MOUTAI, PUFA, RecordingProvider, d, dynamic_kline, fixture_kline, raw_cross, strings,
};

#[tokio::test]
async fn realtime_keeps_provider_order() {
    let k = fixture_kline();
    let cs = k
        .realtime(&strings(&[MOUTAI, PUFA]), &strings(&["rt_last", "rt_pct_chg"]))
        .await
        .unwrap();
    assert_eq!(cs.keys(), &strings(&[MOUTAI, PUFA]));
    assert!(cs.value(PUFA, "rt_last").is_some());
    let records = cs.to_records();
    assert_eq!(records[0]["code"], MOUTAI);
}

#[tokio::test]
async fn quote_requests_default_realtime_fields() {
    let k = fixture_kline();
    let cs = k.quote(&strings(&[PUFA, MOUTAI])).await.unwrap();
    assert_eq!(
        cs.fields(),
        &strings(&["rt_last", "rt_vol", "rt_amt", "rt_chg", "rt_pct_chg"])
    );
    assert!(cs.value(MOUTAI, "rt_amt").is_some());

    let (p, _ctl) = kline_mock::DynamicMockProvider::new_with_controller("dyn");
    let k = Kline::builder()
        .with_provider(p)
        .default_realtime_fields(["rt_last"])
        .build()
        .unwrap();
    assert!(matches!(k.quote(&[]).await, Err(KlineError::InvalidArg(_))));
    assert_eq!(k.config().default_realtime_fields, strings(&["rt_last"]));
}

#[tokio::test]
async fn realtime_duplicate_codes_are_malformed() {
    let (k, ctl) = dynamic_kline();
    ctl.set_snapshot_behavior(MockBehavior::Return(raw_cross(
        &[PUFA, PUFA],
        &["rt_last"],
        vec![vec![Some(1.0)], vec![Some(2.0)]],
    )))
    .await;
    let err = k
        .realtime(&strings(&[PUFA]), &strings(&["rt_last"]))
        .await
        .unwrap_err();
    assert!(matches!(err, KlineError::MalformedResponse(_)));
}

#[tokio::test]
async fn snapshot_inputs_are_validated() {
    let k = fixture_kline();
    assert!(matches!(
        k.realtime(&[], &strings(&["rt_last"])).await,
        Err(KlineError::InvalidArg(_))
    ));
    assert!(matches!(
        k.fundamentals(&strings(&[PUFA]), &[], None).await,
        Err(KlineError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn fundamentals_use_explicit_or_today() {
    let p = Arc::new(RecordingProvider::default());
    let k = Kline::builder().with_provider(p.clone()).build().unwrap();
    let codes = strings(&[PUFA]);
    let fields = strings(&["pe_ttm"]);

    k.fundamentals(&codes, &fields, Some(d(2024, 6, 28))).await.unwrap();
    let before = chrono::Utc::now()
        .with_timezone(&chrono_tz::Asia::Shanghai)
        .date_naive();
    let cs = k.fundamentals(&codes, &fields, None).await.unwrap();
    assert_eq!(cs.value(PUFA, "pe_ttm"), None);

    let seen = p.as_of.lock().unwrap();
    assert_eq!(seen[0], d(2024, 6, 28));
    assert!(seen[1] >= before);
}

#[tokio::test]
async fn fundamentals_from_fixture() {
    let k = fixture_kline();
    let cs = k
        .fundamentals(&strings(&[PUFA, "UNKNOWN"]), &strings(&["pe_ttm", "pb_lf"]), Some(d(2024, 3, 29)))
        .await
        .unwrap();
    assert!(cs.value(PUFA, "pe_ttm").is_some());
    assert_eq!(cs.row_for("UNKNOWN"), Some(&[None, None][..]));
}
