//! Image source resolution with an in-memory failure cache.
//!
//! Remote product and recipe images break often (expired CDN links, hotlink
//! protection). Once an `<img>` reports an error its URL is remembered for
//! the rest of the session and every later render goes straight to the
//! icon fallback instead of retrying the broken request.

#[cfg(test)]
#[path = "image_fallback_test.rs"]
mod image_fallback_test;

use std::cell::RefCell;
use std::collections::HashSet;

use crate::util::icons;

/// What an image slot should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Icon(&'static str),
}

/// Set of image URLs that failed to load.
#[derive(Debug, Default)]
pub struct ImageFallbackCache {
    failed: HashSet<String>,
}

impl ImageFallbackCache {
    pub fn resolve(&self, url: Option<&str>, name: &str, category: Option<&str>) -> ImageSource {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) if !self.failed.contains(url) => ImageSource::Remote(url.to_owned()),
            _ => ImageSource::Icon(icons::resolve_item_icon(name, category)),
        }
    }

    /// Returns `true` the first time a URL is reported.
    pub fn mark_failed(&mut self, url: &str) -> bool {
        self.failed.insert(url.trim().to_owned())
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url.trim())
    }
}

thread_local! {
    static CACHE: RefCell<ImageFallbackCache> = RefCell::new(ImageFallbackCache::default());
}

/// Resolve against the session-wide cache.
pub fn resolve(url: Option<&str>, name: &str, category: Option<&str>) -> ImageSource {
    CACHE.with(|c| c.borrow().resolve(url, name, category))
}

/// Record a load failure in the session-wide cache.
pub fn mark_failed(url: &str) {
    if CACHE.with(|c| c.borrow_mut().mark_failed(url)) {
        leptos::logging::log!("image failed, using icon fallback: {url}");
    }
}
