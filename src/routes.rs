//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host has no API of its own. It server-renders the Leptos shell for
//! every client route and serves the compiled WASM bundle under `/pkg`. The
//! REST backend lives elsewhere and is reached by the browser directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum RoutesError {
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

/// Leptos SSR routes plus static assets and the health probe.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[package.metadata.leptos]` section).
pub fn app(config: &ServerConfig) -> Result<Router, RoutesError> {
    let conf = get_configuration(None).map_err(|e| RoutesError::Leptos(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    if let Some(root) = &config.site_root {
        leptos_options.site_root = root.as_str().into();
    }
    let routes = generate_route_list(trackabite_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || trackabite_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    tracing::info!(site_root = %site_root_path.display(), "serving static assets");

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new().gzip(true))
        .layer(TraceLayer::new_for_http()))
}

fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
