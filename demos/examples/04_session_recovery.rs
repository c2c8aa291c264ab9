use std::time::Duration;

use kline::{ConnectionState, Kline, ProviderError, RawTabularResponse, resolve_window};
use kline_mock::{DynamicMockProvider, MockBehavior};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("scripted");
    let kline = Kline::builder()
        .with_provider(provider)
        .operation_timeout(Duration::from_millis(200))
        .build()?;

    let window = resolve_window("D", 5, chrono::NaiveDate::from_ymd_opt(2024, 1, 5).ok_or("bad date")?)?;
    let fields = vec!["close".to_string()];

    // 1. A vendor error: the session is torn down and the error surfaces unchanged.
    ctl.set_series_behavior(
        "600000.SH",
        MockBehavior::Fail(ProviderError::new(-40_522_017, "no data")),
    )
    .await;
    let err = kline.history("600000.SH", &fields, &window).await.unwrap_err();
    println!("error: {err} (retryable: {})", err.is_retryable());
    assert_eq!(kline.session().state(), ConnectionState::Disconnected);

    // 2. A hung call: the operation timeout fires and the session resets.
    ctl.set_series_behavior("600000.SH", MockBehavior::Hang).await;
    let err = kline.history("600000.SH", &fields, &window).await.unwrap_err();
    println!("error: {err}");

    // 3. Recovery: the next call reconnects.
    ctl.set_series_behavior(
        "600000.SH",
        MockBehavior::Return(RawTabularResponse {
            dates: vec!["2024-01-04".into(), "2024-01-05".into()],
            fields: fields.clone(),
            rows: vec![vec![Some(10.1)], vec![Some(10.3)]],
        }),
    )
    .await;
    let s = kline.history("600000.SH", &fields, &window).await?;
    println!(
        "recovered: {} rows after {} connects, {} disconnects",
        s.len(),
        ctl.connect_calls(),
        ctl.disconnect_calls()
    );

    kline.shutdown().await;
    Ok(())
}
