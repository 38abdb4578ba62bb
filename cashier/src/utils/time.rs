//! Business time zone helpers
//!
//! Transactions are stored as UTC instants. Calendar questions ("today",
//! "this week") are answered in the configured business time zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default business time zone (WIB)
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;

/// Parse an IANA time zone name, falling back to [`DEFAULT_TIMEZONE`]
pub fn parse_timezone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse business timezone '{}': {}, falling back to {}",
            name,
            e,
            DEFAULT_TIMEZONE
        );
        DEFAULT_TIMEZONE
    })
}

/// Calendar date of an instant in the business time zone
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Midnight at the start of `date` (business time zone) as a UTC instant
///
/// DST gap fallback: when local midnight does not exist, midnight UTC is used.
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first)
}

/// Display an instant as local `dd/mm/yyyy HH:MM`
pub fn format_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
}
