use chrono::{Datelike, NaiveDate};
use kline_core::{Cell, Granularity, QueryWindow, RawTabularResponse};

use super::base_price;
use super::calendar::{is_trading_day, trading_days};

const SESSION_MINUTES: u32 = 240;

struct Bar {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn bar(base: f64, d: NaiveDate) -> Bar {
    let t = f64::from(d.num_days_from_ce());
    let close = base * (1.0 + 0.05 * (t / 7.0).sin());
    let open = base * (1.0 + 0.05 * ((t - 1.0) / 7.0).sin());
    let spread = base * 0.01;
    Bar {
        open,
        high: open.max(close) + spread,
        low: open.min(close) - spread,
        close,
        volume: 1_000_000.0 + 10_000.0 * (t % 17.0),
    }
}

fn cell(b: &Bar, field: &str) -> Cell {
    match field {
        "open" => Some(b.open),
        "high" => Some(b.high),
        "low" => Some(b.low),
        "close" => Some(b.close),
        "volume" => Some(b.volume),
        "amt" => Some(b.volume * b.close),
        // vendors answer unknown fields with NaN
        _ => Some(f64::NAN),
    }
}

fn last_trading_day_of_week_or_month(d: NaiveDate, g: Granularity) -> bool {
    let mut next = d.succ_opt();
    while let Some(n) = next {
        if is_trading_day(n) {
            return match g {
                Granularity::Weekly => n.iso_week() != d.iso_week(),
                Granularity::Monthly => n.month() != d.month(),
                _ => true,
            };
        }
        next = n.succ_opt();
    }
    true
}

/// Bars for `code` over `window`, or `None` for an unknown code.
///
/// Weekly and monthly windows yield one bar per period on its last trading day.
/// Intraday windows yield one bar per day whose volume is the bar's share of a
/// 240-minute session.
pub fn by_code(code: &str, fields: &[String], window: &QueryWindow) -> Option<RawTabularResponse> {
    let base = base_price(code)?;
    let g = window.granularity();
    let session_share = g
        .minutes()
        .map_or(1.0, |m| f64::from(m.min(SESSION_MINUTES)) / f64::from(SESSION_MINUTES));
    let days: Vec<NaiveDate> = trading_days(window.start(), window.end())
        .into_iter()
        .filter(|d| match g {
            Granularity::Weekly | Granularity::Monthly => last_trading_day_of_week_or_month(*d, g),
            _ => true,
        })
        .collect();
    Some(RawTabularResponse {
        dates: days.iter().map(|d| d.format("%Y%m%d").to_string()).collect(),
        fields: fields.to_vec(),
        rows: days
            .iter()
            .map(|d| {
                let mut b = bar(base, *d);
                b.volume *= session_share;
                fields.iter().map(|f| cell(&b, f)).collect()
            })
            .collect(),
    })
}
