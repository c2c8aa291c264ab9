use chrono::{Datelike, NaiveDate, Weekday};

// 2024 mainland exchange closures falling on weekdays.
const HOLIDAYS_2024: &[(u32, u32)] = &[
    (1, 1),
    (2, 9),
    (2, 12),
    (2, 13),
    (2, 14),
    (2, 15),
    (2, 16),
    (4, 4),
    (4, 5),
    (5, 1),
    (5, 2),
    (5, 3),
    (6, 10),
    (9, 16),
    (9, 17),
    (10, 1),
    (10, 2),
    (10, 3),
    (10, 4),
    (10, 7),
];

pub fn is_holiday(d: NaiveDate) -> bool {
    d.year() == 2024 && HOLIDAYS_2024.contains(&(d.month(), d.day()))
}

pub fn is_trading_day(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) && !is_holiday(d)
}

pub fn trading_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_trading_day(*d))
        .collect()
}

pub fn supports_exchange(exchange: &str) -> bool {
    matches!(exchange, "SSE" | "SZSE")
}
