//! Display formatting for quantities and expiry dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;
use time::macros::format_description;

use crate::net::types::Quantity;

pub const NOT_AVAILABLE: &str = "N/A";

/// Render an item quantity for display.
///
/// Text is shown verbatim (`"2 cups"`, `"3"`); numbers drop a trailing
/// `.0`. Missing, blank and zero quantities render as `N/A`.
pub fn format_quantity(quantity: Option<&Quantity>) -> String {
    match quantity {
        Some(Quantity::Number(n)) if *n != 0.0 && n.is_finite() => n.to_string(),
        Some(Quantity::Text(text)) if !text.trim().is_empty() => text.clone(),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Freshness tier derived from days until expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    /// Still good but inside the one-week window.
    Warning,
    Good,
}

impl ExpiryStatus {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Expired,
            0..=4 => Self::ExpiringSoon,
            5..=7 => Self::Warning,
            _ => Self::Good,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Warning | Self::Good => "Good",
        }
    }

    /// CSS modifier for badges.
    pub fn tier(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring-soon",
            Self::Warning => "warning",
            Self::Good => "good",
        }
    }
}

/// Parse the `YYYY-MM-DD` prefix of an ISO date or timestamp.
pub fn parse_expiry_date(raw: &str) -> Option<Date> {
    let prefix = raw.trim().get(..10)?;
    Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok()
}

pub fn days_until(expiry: Date, today: Date) -> i64 {
    (expiry - today).whole_days()
}

/// Days remaining and status for a raw expiry date, if it parses.
pub fn expiry_status(raw: Option<&str>, today: Date) -> Option<(i64, ExpiryStatus)> {
    let expiry = parse_expiry_date(raw?)?;
    let days = days_until(expiry, today);
    Some((days, ExpiryStatus::from_days(days)))
}

/// Short human description of the days remaining.
pub fn describe_days(days: i64) -> String {
    match days {
        d if d < -1 => format!("Expired {} days ago", -d),
        -1 => "Expired yesterday".to_owned(),
        0 => "Expires today".to_owned(),
        1 => "Expires tomorrow".to_owned(),
        d => format!("{d} days left"),
    }
}
