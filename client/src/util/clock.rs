//! Wall-clock helpers shared by persisted timestamps and expiry math.

use time::{Date, OffsetDateTime};

/// Current time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

/// Today's calendar date in UTC.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
