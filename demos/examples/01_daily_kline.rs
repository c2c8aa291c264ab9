use kline::{IndicatorConfig, Kline, indicators};
use kline_demos::common::{cell, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the facade.
    let kline = Kline::builder().with_provider(get_provider()).build()?;

    // 2. Fetch ~120 calendar days of daily bars, forward-adjusted.
    let bars = kline.kline("600519.SH", "D", 120).await?;
    println!("Fetched {} daily bars for 600519.SH", bars.len());

    // 3. Decorate with the standard indicator bundle plus daily returns.
    let rich = indicators::apply(&bars, &IndicatorConfig::default())?;
    let rich = indicators::returns(&rich, "close")?;

    // 4. Print the last few rows.
    println!(
        "\n{:<12} | {:>10} | {:>10} | {:>10} | {:>8} | {:>10}",
        "date", "close", "ma20", "macd", "rsi", "return"
    );
    let start = rich.len().saturating_sub(5);
    for i in start..rich.len() {
        let date = rich.axis()[i];
        println!(
            "{:<12} | {:>10} | {:>10} | {:>10} | {:>8} | {:>10}",
            date.to_string(),
            cell(rich.value(date, "close")),
            cell(rich.value(date, "ma20")),
            cell(rich.value(date, "macd")),
            cell(rich.value(date, "rsi")),
            cell(rich.value(date, "close_return")),
        );
    }

    // 5. JSON row records, as an HTTP layer would return them.
    let records = rich.to_records();
    if let Some(last) = records.last() {
        println!("\nLast record:\n{}", serde_json::to_string_pretty(last)?);
    }

    kline.shutdown().await;
    Ok(())
}
