//! Client configuration resolved at build time.
//!
//! Values come from `option_env!` so the WASM bundle carries them without a
//! runtime config fetch. Unset or unparsable variables fall back to the
//! defaults below.
//!
//! - `TRACKABITE_API_URL`: REST base URL (default `/api`)
//! - `TRACKABITE_IMPORT_POLL_INTERVAL_MS`: default 3000
//! - `TRACKABITE_IMPORT_POLL_TIMEOUT_MS`: default 60000
//! - `TRACKABITE_IMPORT_POLL_MAX_ERRORS`: default 3
//! - `TRACKABITE_TOUR_AUTO_ADVANCE_MS`: default 4000
//! - `TRACKABITE_INSTALL_PROMPT_COOLDOWN_DAYS`: default 7

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_IMPORT_POLL_INTERVAL_MS: u32 = 3_000;
pub const DEFAULT_IMPORT_POLL_TIMEOUT_MS: u32 = 60_000;
pub const DEFAULT_IMPORT_POLL_MAX_ERRORS: u32 = 3;
pub const DEFAULT_TOUR_AUTO_ADVANCE_MS: u32 = 4_000;
pub const DEFAULT_INSTALL_PROMPT_COOLDOWN_DAYS: u32 = 7;

/// Timing for the recipe-import detection poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    pub interval_ms: u32,
    pub timeout_ms: u32,
    /// Consecutive transport failures tolerated before giving up.
    pub max_consecutive_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_IMPORT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_IMPORT_POLL_TIMEOUT_MS,
            max_consecutive_errors: DEFAULT_IMPORT_POLL_MAX_ERRORS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub import_poll: PollConfig,
    pub tour_auto_advance_ms: u32,
    pub install_prompt_cooldown_days: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            import_poll: PollConfig::default(),
            tour_auto_advance_ms: DEFAULT_TOUR_AUTO_ADVANCE_MS,
            install_prompt_cooldown_days: DEFAULT_INSTALL_PROMPT_COOLDOWN_DAYS,
        }
    }
}

impl ClientConfig {
    /// Build from the variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: api_base_url().to_owned(),
            import_poll: PollConfig {
                interval_ms: parse_or(
                    option_env!("TRACKABITE_IMPORT_POLL_INTERVAL_MS"),
                    DEFAULT_IMPORT_POLL_INTERVAL_MS,
                ),
                timeout_ms: parse_or(option_env!("TRACKABITE_IMPORT_POLL_TIMEOUT_MS"), DEFAULT_IMPORT_POLL_TIMEOUT_MS),
                max_consecutive_errors: parse_or(
                    option_env!("TRACKABITE_IMPORT_POLL_MAX_ERRORS"),
                    DEFAULT_IMPORT_POLL_MAX_ERRORS,
                ),
            },
            tour_auto_advance_ms: parse_or(option_env!("TRACKABITE_TOUR_AUTO_ADVANCE_MS"), DEFAULT_TOUR_AUTO_ADVANCE_MS),
            install_prompt_cooldown_days: parse_or(
                option_env!("TRACKABITE_INSTALL_PROMPT_COOLDOWN_DAYS"),
                DEFAULT_INSTALL_PROMPT_COOLDOWN_DAYS,
            ),
        }
    }
}

/// REST base URL without a trailing slash.
pub fn api_base_url() -> &'static str {
    normalize_base_url(option_env!("TRACKABITE_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
}

fn normalize_base_url(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed }
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
