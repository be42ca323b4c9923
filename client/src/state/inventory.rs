//! Grocery inventory view state.
//!
//! Rows are ordered by urgency: soonest expiry first, items without a
//! parseable expiry date last, ties broken by name.

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;

use std::cmp::Ordering;

use leptos::prelude::*;
use time::Date;

use super::session::{SessionState, report};
use crate::net::inventory;
use crate::net::types::InventoryItem;
use crate::util::format::{ExpiryStatus, expiry_status};
use crate::util::icons;

#[derive(Clone, Debug, Default)]
pub struct InventoryState {
    pub items: Vec<InventoryItem>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
    /// Canonical category to show, or all.
    pub category_filter: Option<String>,
    pub search: String,
}

/// One inventory item with its derived expiry data.
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryRow {
    pub item: InventoryItem,
    pub days_left: Option<i64>,
    pub status: Option<ExpiryStatus>,
}

impl InventoryRow {
    pub fn new(item: InventoryItem, today: Date) -> Self {
        let expiry = expiry_status(item.expiry_date.as_deref(), today);
        Self { days_left: expiry.map(|(d, _)| d), status: expiry.map(|(_, s)| s), item }
    }
}

fn by_urgency(a: &InventoryRow, b: &InventoryRow) -> Ordering {
    match (a.days_left, b.days_left) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.item.name.to_lowercase().cmp(&b.item.name.to_lowercase()))
}

fn category_of(item: &InventoryItem) -> Option<&'static str> {
    item.category.as_deref().and_then(icons::canonical_category)
}

impl InventoryState {
    /// Rows passing the current filters, most urgent first.
    pub fn rows(&self, today: Date) -> Vec<InventoryRow> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<InventoryRow> = self
            .items
            .iter()
            .filter(|item| {
                self.category_filter
                    .as_deref()
                    .is_none_or(|wanted| category_of(item) == Some(wanted))
            })
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .map(|item| InventoryRow::new(item.clone(), today))
            .collect();
        rows.sort_by(by_urgency);
        rows
    }

    /// Distinct canonical categories present, sorted.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> = self.items.iter().filter_map(category_of).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Count of items that are expired or expiring within four days.
    pub fn urgent_count(&self, today: Date) -> usize {
        self.items
            .iter()
            .filter_map(|i| expiry_status(i.expiry_date.as_deref(), today))
            .filter(|(_, status)| *status <= ExpiryStatus::ExpiringSoon)
            .count()
    }
}

/// Fetch the inventory into `state`.
pub fn load_inventory(state: RwSignal<InventoryState>, session: RwSignal<SessionState>) {
    state.update(|s| s.loading = true);
    leptos::task::spawn_local(async move {
        match inventory::fetch_inventory().await {
            Ok(items) => state.update(|s| {
                s.items = items;
                s.loading = false;
                s.loaded = true;
                s.error = None;
            }),
            Err(e) => {
                let message = report(session, "load inventory", &e);
                state.update(|s| {
                    s.loading = false;
                    s.error = message;
                });
            }
        }
    });
}
