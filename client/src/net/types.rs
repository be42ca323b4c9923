//! DTOs for the Trackabite REST API.
//!
//! DESIGN
//! ======
//! The backend owns these records; the client only renders them and
//! forwards CRUD calls. Fields the UI does not read are left out and
//! optional fields default so older payloads still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A quantity as entered by the user: either a bare number or free text
/// such as `"2 cups"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

/// An item in the user's grocery inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// ISO date (`YYYY-MM-DD`) or timestamp.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
    #[serde(default)]
    pub share_code: Option<String>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ShoppingList {
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: Option<Quantity>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for `POST /shopping-lists/:id/items`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial update for a list; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial update for an item; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShoppingItemPatch {
    /// Apply the present fields to a local copy of the item.
    pub fn apply_to(&self, item: &mut ShoppingListItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(quantity) = &self.quantity {
            item.quantity = Some(quantity.clone());
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        if let Some(notes) = &self.notes {
            item.notes = Some(notes.clone());
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_code: String,
    #[serde(default)]
    pub share_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateResponse {
    #[serde(default)]
    pub migrated: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    #[serde(default, alias = "movedCount")]
    pub moved: u32,
}

/// Google Drive connection state.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub auto_sync: bool,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub last_sync_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    #[serde(default)]
    pub total_recipes: u32,
    #[serde(default)]
    pub synced_recipes: u32,
    #[serde(default)]
    pub pending_recipes: u32,
    #[serde(default)]
    pub last_sync_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

/// Body for `PUT /drive/settings`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSettings {
    pub auto_sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SyncAllResponse {
    #[serde(default)]
    pub synced: u32,
    #[serde(default)]
    pub failed: u32,
}

/// A recipe as extracted, generated or saved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub total_time: Option<String>,
}

/// Summary row from `GET /saved-recipes`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub synced_to_drive: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportRequest {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body for `POST /recipes/multi-modal-extract`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApifyUsage {
    #[serde(default)]
    pub used: u32,
    #[serde(default)]
    pub limit: u32,
}

impl ApifyUsage {
    pub fn remaining(self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

/// iOS Shortcut provisioning payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutSetup {
    pub token: String,
    pub install_url: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Server-side view of the user's onboarding tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    InProgress,
    Completed,
    Dismissed,
}

impl OnboardingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Dismissed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatusBody {
    pub status: OnboardingStatus,
}

/// Error body shape shared by every endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
