//! Google Drive cloud-sync endpoints.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "drive_test.rs"]
mod drive_test;

use super::api::{self, Method};
use super::error::ApiError;
use super::types::{AuthUrlResponse, DriveSettings, DriveStatus, SyncAllResponse, SyncStats};

pub const STATUS_PATH: &str = "/drive/status";
pub const SYNC_STATS_PATH: &str = "/drive/sync-stats";
pub const AUTH_URL_PATH: &str = "/drive/auth-url";
pub const DISCONNECT_PATH: &str = "/drive/disconnect";
pub const SETTINGS_PATH: &str = "/drive/settings";
pub const SYNC_ALL_PATH: &str = "/drive/sync-all";

pub fn sync_recipe_path(recipe_id: &str) -> String {
    format!("/drive/sync/{recipe_id}")
}

pub async fn fetch_status() -> Result<DriveStatus, ApiError> {
    api::get(STATUS_PATH).await
}

pub async fn fetch_sync_stats() -> Result<SyncStats, ApiError> {
    api::get(SYNC_STATS_PATH).await
}

/// OAuth consent URL the browser should navigate to.
pub async fn fetch_auth_url() -> Result<String, ApiError> {
    api::get::<AuthUrlResponse>(AUTH_URL_PATH).await.map(|r| r.url)
}

pub async fn disconnect() -> Result<(), ApiError> {
    api::send_unit::<()>(Method::Post, DISCONNECT_PATH, None).await
}

pub async fn update_settings(settings: &DriveSettings) -> Result<DriveStatus, ApiError> {
    api::send(Method::Put, SETTINGS_PATH, Some(settings)).await
}

pub async fn sync_recipe(recipe_id: &str) -> Result<(), ApiError> {
    api::send_unit::<()>(Method::Post, &sync_recipe_path(recipe_id), None).await
}

pub async fn sync_all() -> Result<SyncAllResponse, ApiError> {
    api::send::<(), _>(Method::Post, SYNC_ALL_PATH, None).await
}
