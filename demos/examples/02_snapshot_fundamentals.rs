use kline::Kline;
use kline_demos::common::{cell, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kline = Kline::builder().with_provider(get_provider()).build()?;
    let codes: Vec<String> = ["600000.SH", "000001.SZ", "600519.SH"]
        .into_iter()
        .map(String::from)
        .collect();

    // Realtime snapshot.
    let fields: Vec<String> = ["rt_last", "rt_pct_chg", "rt_vol"]
        .into_iter()
        .map(String::from)
        .collect();
    let snap = kline.realtime(&codes, &fields).await?;
    println!("## Snapshot");
    for code in snap.keys() {
        println!(
            "{:<10} last={:>10} chg%={:>6} vol={:>12}",
            code,
            cell(snap.value(code, "rt_last")),
            cell(snap.value(code, "rt_pct_chg")),
            cell(snap.value(code, "rt_vol")),
        );
    }

    // Fundamentals as of today in Asia/Shanghai.
    let fields: Vec<String> = ["pe_ttm", "pb_lf", "mkt_cap_ard"]
        .into_iter()
        .map(String::from)
        .collect();
    let fundamentals = kline.fundamentals(&codes, &fields, None).await?;
    println!("\n## Fundamentals");
    println!("{}", serde_json::to_string_pretty(&fundamentals.to_records())?);

    kline.shutdown().await;
    Ok(())
}
