//! # trackabite-client
//!
//! Leptos + WASM frontend for Trackabite: grocery inventory, shared shopping
//! lists, recipe import and the guided onboarding tour.
//!
//! This crate contains pages, components, application state, the REST client
//! and its DTOs. Built with `hydrate` it runs in the browser; built with `ssr`
//! it renders the same `App` on the server. With neither feature every
//! browser-only path is stubbed out so the logic can be unit tested natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point called by the generated hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
