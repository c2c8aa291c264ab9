use chrono::NaiveDate;
use kline::{Kline, dates};
use kline_demos::common::get_provider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kline = Kline::builder().with_provider(get_provider()).build()?;

    let start = dates::parse_date("2024/02/01")?;
    let end = NaiveDate::from_ymd_opt(2024, 2, 29).ok_or("bad date")?;

    // Exchange calendar from the provider: excludes the Spring Festival closure.
    let exchange = kline.trading_days(start, Some(end), None).await?;

    // Weekday approximation: does not know about holidays.
    let approx = dates::approximate_trading_days(Some(end), exchange.len());

    println!("Provider calendar: {} days", exchange.len());
    println!("Weekday approximation from {}: {} days", approx[0], approx.len());
    let missing: Vec<_> = approx.iter().filter(|d| !exchange.contains(*d)).collect();
    println!("Approximation includes closed days: {missing:?}");
    println!(
        "Inclusive span {} .. {}: {} days",
        start,
        end,
        dates::day_count(&start.to_string(), "20240229")?
    );

    kline.shutdown().await;
    Ok(())
}
