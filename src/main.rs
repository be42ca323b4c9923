#![recursion_limit = "256"]

mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        // Missing outside development.
        Err(e) => tracing::debug!(error = %e, "no .env loaded"),
    }

    if let Err(e) = run().await {
        tracing::error!(error = %e, "trackabite host failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::ServerConfig::from_env()?;
    let app = routes::app(&config)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, site_root = ?config.site_root, "trackabite listening");
    axum::serve(listener, app).await?;
    Ok(())
}
