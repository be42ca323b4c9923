//! Colored freshness badge for an inventory item.

use leptos::prelude::*;

use crate::util::clock;
use crate::util::format::{describe_days, expiry_status};

/// Renders nothing when the expiry date is missing or unparseable.
#[component]
pub fn ExpiryBadge(expiry_date: Option<String>) -> impl IntoView {
    expiry_status(expiry_date.as_deref(), clock::today_utc()).map(|(days, status)| {
        view! {
            <span class=format!("expiry-badge expiry-badge--{}", status.tier()) title=describe_days(days)>
                {status.label()}
            </span>
        }
    })
}
