//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("TRACKABITE_SITE_ROOT is set but empty")]
    EmptySiteRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Overrides the Leptos `site-root` when set.
    pub site_root: Option<String>,
}

impl ServerConfig {
    /// Build host config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `TRACKABITE_SITE_ROOT`: directory holding the built `pkg/` assets
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("TRACKABITE_SITE_ROOT").ok().as_deref(),
        )
    }

    pub(crate) fn from_vars(port: Option<&str>, site_root: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self { port: parse_port(port)?, site_root: parse_site_root(site_root)? })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}

fn parse_site_root(raw: Option<&str>) -> Result<Option<String>, ConfigError> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("") => Err(ConfigError::EmptySiteRoot),
        Some(value) => Ok(Some(value.trim_end_matches('/').to_owned())),
    }
}
