//! Recipe import, extraction and listing endpoints, plus iOS Shortcut
//! provisioning for share-sheet imports.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "recipes_test.rs"]
mod recipes_test;

use super::api::{self, Method};
use super::error::ApiError;
use super::types::{ApifyUsage, ExtractRequest, ImportRequest, ImportResponse, Recipe, SavedRecipe, ShortcutSetup};

pub const IMPORT_INSTAGRAM_PATH: &str = "/recipes/import-instagram";
pub const IMPORT_INSTAGRAM_APIFY_PATH: &str = "/recipes/import-instagram-apify";
pub const MULTI_MODAL_EXTRACT_PATH: &str = "/recipes/multi-modal-extract";
pub const SAVE_PATH: &str = "/recipes/save";
pub const APIFY_USAGE_PATH: &str = "/recipes/apify-usage";
pub const SAVED_RECIPES_PATH: &str = "/saved-recipes";
pub const CACHED_AI_RECIPES_PATH: &str = "/ai-recipes/cached";
pub const SHORTCUT_SETUP_PATH: &str = "/shortcuts/setup";

const INSTAGRAM_HOSTS: &[&str] = &["instagram.com", "www.instagram.com", "m.instagram.com", "instagr.am"];
const INSTAGRAM_CONTENT_SEGMENTS: &[&str] = &["p", "reel", "reels", "tv"];

/// Canonicalize an Instagram post/reel link, or `None` if it isn't one.
///
/// Query strings and fragments are dropped so share-sheet tracking
/// parameters don't defeat server-side caching.
pub fn normalize_instagram_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = rest.split_once('/')?;
    if !INSTAGRAM_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        return None;
    }
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let kind = segments.next()?;
    let id = segments.next()?;
    if !INSTAGRAM_CONTENT_SEGMENTS.contains(&kind) {
        return None;
    }
    Some(format!("https://www.instagram.com/{kind}/{id}/"))
}

async fn import_via(path: &str, url: &str) -> Result<Recipe, ApiError> {
    let body = ImportRequest { url: url.to_owned() };
    let resp: ImportResponse = api::send(Method::Post, path, Some(&body)).await?;
    match resp.recipe {
        Some(recipe) => Ok(recipe),
        None => Err(ApiError::Http { status: 422, message: resp.error }),
    }
}

pub async fn import_instagram(url: &str) -> Result<Recipe, ApiError> {
    import_via(IMPORT_INSTAGRAM_PATH, url).await
}

pub async fn import_instagram_apify(url: &str) -> Result<Recipe, ApiError> {
    import_via(IMPORT_INSTAGRAM_APIFY_PATH, url).await
}

pub async fn multi_modal_extract(request: &ExtractRequest) -> Result<Recipe, ApiError> {
    api::send(Method::Post, MULTI_MODAL_EXTRACT_PATH, Some(request)).await
}

pub async fn save_recipe(recipe: &Recipe) -> Result<SavedRecipe, ApiError> {
    api::send(Method::Post, SAVE_PATH, Some(recipe)).await
}

pub async fn fetch_apify_usage() -> Result<ApifyUsage, ApiError> {
    api::get(APIFY_USAGE_PATH).await
}

pub async fn fetch_saved_recipes() -> Result<Vec<SavedRecipe>, ApiError> {
    api::get(SAVED_RECIPES_PATH).await
}

pub async fn fetch_cached_ai_recipes() -> Result<Vec<Recipe>, ApiError> {
    api::get(CACHED_AI_RECIPES_PATH).await
}

pub async fn fetch_shortcut_setup() -> Result<ShortcutSetup, ApiError> {
    api::get(SHORTCUT_SETUP_PATH).await
}
