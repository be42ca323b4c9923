//! Shopping list endpoints.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "shopping_test.rs"]
mod shopping_test;

use super::api::{self, Method};
use super::error::ApiError;
use super::types::{
    MigrateResponse, NewShoppingItem, PurchaseResponse, ShareResponse, ShoppingItemPatch, ShoppingList,
    ShoppingListItem, ShoppingListPatch,
};

pub const LISTS_PATH: &str = "/shopping-lists";
pub const MIGRATE_PATH: &str = "/shopping-lists/migrate";

pub fn list_path(list_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}")
}

pub fn items_path(list_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/items")
}

pub fn item_path(list_id: &str, item_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/items/{item_id}")
}

pub fn toggle_path(list_id: &str, item_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/items/{item_id}/toggle")
}

pub fn clear_completed_path(list_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/clear-completed")
}

pub fn share_path(list_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/share")
}

pub fn join_path(share_code: &str) -> String {
    format!("{LISTS_PATH}/join/{share_code}")
}

pub fn purchase_path(list_id: &str) -> String {
    format!("{LISTS_PATH}/{list_id}/purchase-to-inventory")
}

/// Normalize user input into a share code.
///
/// Accepts a bare code or a pasted invite link ending in `/join/<code>`.
/// Codes are 4–16 ASCII alphanumerics, compared upper-case.
pub fn normalize_share_code(input: &str) -> Option<String> {
    let without_query = input.trim().split(['?', '#']).next().unwrap_or_default();
    let path = without_query.trim_end_matches('/');
    let candidate = path.rsplit_once("/join/").map_or(path, |(_, code)| code);
    let valid = (4..=16).contains(&candidate.len()) && candidate.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| candidate.to_ascii_uppercase())
}

pub async fn fetch_lists() -> Result<Vec<ShoppingList>, ApiError> {
    api::get(LISTS_PATH).await
}

pub async fn create_list(name: &str) -> Result<ShoppingList, ApiError> {
    let body = serde_json::json!({ "name": name });
    api::send(Method::Post, LISTS_PATH, Some(&body)).await
}

pub async fn fetch_list(list_id: &str) -> Result<ShoppingList, ApiError> {
    api::get(&list_path(list_id)).await
}

pub async fn update_list(list_id: &str, patch: &ShoppingListPatch) -> Result<ShoppingList, ApiError> {
    api::send(Method::Put, &list_path(list_id), Some(patch)).await
}

pub async fn delete_list(list_id: &str) -> Result<(), ApiError> {
    api::send_unit::<()>(Method::Delete, &list_path(list_id), None).await
}

pub async fn add_item(list_id: &str, item: &NewShoppingItem) -> Result<ShoppingListItem, ApiError> {
    api::send(Method::Post, &items_path(list_id), Some(item)).await
}

pub async fn update_item(list_id: &str, item_id: &str, patch: &ShoppingItemPatch) -> Result<ShoppingListItem, ApiError> {
    api::send(Method::Put, &item_path(list_id, item_id), Some(patch)).await
}

pub async fn delete_item(list_id: &str, item_id: &str) -> Result<(), ApiError> {
    api::send_unit::<()>(Method::Delete, &item_path(list_id, item_id), None).await
}

pub async fn toggle_item(list_id: &str, item_id: &str) -> Result<ShoppingListItem, ApiError> {
    api::send::<(), _>(Method::Post, &toggle_path(list_id, item_id), None).await
}

pub async fn clear_completed(list_id: &str) -> Result<ShoppingList, ApiError> {
    api::send::<(), _>(Method::Post, &clear_completed_path(list_id), None).await
}

pub async fn share_list(list_id: &str) -> Result<ShareResponse, ApiError> {
    api::send::<(), _>(Method::Post, &share_path(list_id), None).await
}

pub async fn join_list(share_code: &str) -> Result<ShoppingList, ApiError> {
    api::get(&join_path(share_code)).await
}

/// Upload lists kept on-device by older versions.
pub async fn migrate_lists(lists: &serde_json::Value) -> Result<MigrateResponse, ApiError> {
    let body = serde_json::json!({ "lists": lists });
    api::send(Method::Post, MIGRATE_PATH, Some(&body)).await
}

pub async fn purchase_to_inventory(list_id: &str) -> Result<PurchaseResponse, ApiError> {
    api::send::<(), _>(Method::Post, &purchase_path(list_id), None).await
}
