use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Whole-day signed difference `b - a`. Negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Inclusive on both ends.
pub fn is_within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Inclusive overlap test between two day spans.
pub fn spans_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first business day strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut current = date + Duration::days(1);
    while !is_business_day(current) {
        current += Duration::days(1);
    }
    current
}

/// Advance `n` business days from `date` (`n = 0` returns `date` unchanged,
/// even on a weekend).
pub fn add_business_days(date: NaiveDate, n: i64) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        current = next_business_day(current);
        remaining -= 1;
    }
    current
}
