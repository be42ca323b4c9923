//! Inventory and onboarding-status endpoints.

#![allow(clippy::missing_errors_doc)]

use super::api::{self, Method};
use super::error::ApiError;
use super::types::{InventoryItem, OnboardingStatus, OnboardingStatusBody};

pub const INVENTORY_PATH: &str = "/inventory";
pub const ONBOARDING_STATUS_PATH: &str = "/onboarding/status";

pub async fn fetch_inventory() -> Result<Vec<InventoryItem>, ApiError> {
    api::get(INVENTORY_PATH).await
}

pub async fn fetch_onboarding_status() -> Result<OnboardingStatus, ApiError> {
    api::get::<OnboardingStatusBody>(ONBOARDING_STATUS_PATH).await.map(|b| b.status)
}

pub async fn report_onboarding_status(status: OnboardingStatus) -> Result<(), ApiError> {
    api::send_unit(Method::Post, ONBOARDING_STATUS_PATH, Some(&OnboardingStatusBody { status })).await
}
