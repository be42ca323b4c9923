//! Stable per-list accent colors persisted on the device.

#[cfg(test)]
#[path = "list_colors_test.rs"]
mod list_colors_test;

use std::collections::BTreeMap;

use crate::util::storage::{self, StorageKey};

pub const LIST_PALETTE: &[&str] = &[
    "#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#E91E63", "#00BCD4", "#FFC107", "#795548",
];

/// List id → hex color.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ListColors(BTreeMap<String, String>);

impl ListColors {
    pub fn load() -> Self {
        storage::load_json(StorageKey::ShoppingListColors).unwrap_or_default()
    }

    pub fn get(&self, list_id: &str) -> Option<&str> {
        self.0.get(list_id).map(String::as_str)
    }

    /// Existing color for `list_id`, or the first palette entry not yet in
    /// use. Once every palette color is taken, colors cycle by count.
    pub fn assign(&mut self, list_id: &str) -> String {
        if let Some(color) = self.0.get(list_id) {
            return color.clone();
        }
        let color = LIST_PALETTE
            .iter()
            .find(|c| !self.0.values().any(|used| used == *c))
            .unwrap_or(&LIST_PALETTE[self.0.len() % LIST_PALETTE.len()]);
        self.0.insert(list_id.to_owned(), (*color).to_owned());
        (*color).to_owned()
    }

    /// Drop colors for lists that no longer exist.
    pub fn retain_lists<'a>(&mut self, live_ids: impl IntoIterator<Item = &'a str>) {
        let live: std::collections::HashSet<&str> = live_ids.into_iter().collect();
        self.0.retain(|id, _| live.contains(id.as_str()));
    }

    pub fn save(&self) {
        storage::save_json(StorageKey::ShoppingListColors, self);
    }
}

/// Assign colors for every id and persist the map if anything changed.
pub fn assign_all<'a>(ids: impl IntoIterator<Item = &'a str>) -> ListColors {
    let mut colors = ListColors::load();
    let before = colors.clone();
    let ids: Vec<&str> = ids.into_iter().collect();
    colors.retain_lists(ids.iter().copied());
    for id in ids {
        colors.assign(id);
    }
    if colors != before {
        colors.save();
    }
    colors
}
