//! Display date parsing for post cards
//!
//! Post dates arrive as whatever text the blog skin rendered: `2024-03-05`,
//! `2024. 3. 5. 14:20`, `24/04/22`, `2024년 3월 5일`, or nothing at all. This
//! module turns them into a millisecond timestamp that only needs to be good
//! enough for ordering.
//!
//! Calendar validity is not checked. Out-of-range days and months roll over
//! into the following period (April 31 becomes May 1, month 13 becomes January
//! of the next year), so every matched string still yields a comparable value.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Timestamp assigned to empty or unrecognized dates
///
/// Sorts before every real timestamp, so undated posts land at the end of a
/// newest-first listing.
pub const OLDEST_TIMESTAMP: i64 = i64::MIN;

/// `YYYY-MM-DD` style dates with `.`, `-` or `/` separators
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,4})\s*[./-]\s*(\d{1,2})\s*[./-]\s*(\d{1,2})")
        .expect("numeric date pattern is valid")
});

/// `YYYY년 M월 D일` long form
static KOREAN_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})\s*년\s*(\d{1,2})\s*월\s*(\d{1,2})\s*일")
        .expect("long-form date pattern is valid")
});

/// Parse a displayed date into a sortable timestamp
///
/// Returns [`OLDEST_TIMESTAMP`] when the text holds no recognizable date.
///
/// # Examples
/// ```
/// use daisy_common::dates::{parse_display_date, OLDEST_TIMESTAMP};
///
/// assert!(parse_display_date("2024-03-06") > parse_display_date("2024.3.5"));
/// assert_eq!(parse_display_date("2024년 3월 5일"), parse_display_date("2024/03/05"));
/// assert_eq!(parse_display_date(""), OLDEST_TIMESTAMP);
/// ```
pub fn parse_display_date(text: &str) -> i64 {
    try_parse_display_date(text).unwrap_or(OLDEST_TIMESTAMP)
}

/// Parse a displayed date, returning `None` when nothing matches
pub fn try_parse_display_date(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let captures = KOREAN_DATE
        .captures(text)
        .or_else(|| NUMERIC_DATE.captures(text))?;

    let year_digits = captures.get(1)?.as_str();
    let mut year: i64 = year_digits.parse().ok()?;
    if year_digits.len() == 2 {
        // 24/04/22
        year += 2000;
    }
    let month: i64 = captures.get(2)?.as_str().parse().ok()?;
    let day: i64 = captures.get(3)?.as_str().parse().ok()?;

    lenient_timestamp(year, month, day)
}

/// Midnight UTC of `year-month-day`, rolling overflowing fields forward
fn lenient_timestamp(year: i64, month: i64, day: i64) -> Option<i64> {
    let month_index = month - 1;
    let year = year + month_index.div_euclid(12);
    let month = u32::try_from(month_index.rem_euclid(12) + 1).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    let date = first_of_month.checked_add_signed(Duration::days(day - 1))?;

    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
