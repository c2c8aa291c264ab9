use kline::Kline;
use kline_demos::common::get_provider;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,kline=trace,kline_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let kline = Kline::builder().with_provider(get_provider()).build()?;

    // Connect lazily, fetch a daily k-line.
    let _ = kline.kline("600000.SH", "D", 30).await?;

    // A forced failure: warn-level event, then teardown.
    let _ = kline.kline("FAIL", "D", 30).await;

    // Next call reconnects.
    let _ = kline.kline("000001.SZ", "W", 12).await?;

    kline.shutdown().await;
    tracing::info!(state = ?kline.session().state(), "demo finished");
    Ok(())
}
