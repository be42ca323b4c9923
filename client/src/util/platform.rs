//! Platform detection and the iOS home-screen install prompt policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guided tour skips its shortcut-install step off iOS, and the install
//! prompt banner only makes sense in mobile Safari before the app has been
//! added to the home screen.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use crate::util::storage::{self, StorageKey};

/// Platform capability relevant to onboarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    Ios,
    #[default]
    Other,
}

impl Platform {
    pub fn is_ios(self) -> bool {
        matches!(self, Self::Ios)
    }
}

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Classify a user agent string.
///
/// iPadOS 13+ reports a desktop Safari UA, so a `Macintosh` UA on a
/// touch-capable device also counts as iOS.
pub fn platform_from_user_agent(user_agent: &str, touch_points: i32) -> Platform {
    let ua = user_agent.to_ascii_lowercase();
    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        return Platform::Ios;
    }
    if ua.contains("macintosh") && touch_points > 1 {
        return Platform::Ios;
    }
    Platform::Other
}

/// Detect the running platform. Always `Other` outside the browser.
pub fn detect() -> Platform {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Platform::Other;
        };
        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        platform_from_user_agent(&user_agent, navigator.max_touch_points())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Platform::Other
    }
}

/// Whether the page is running as an installed home-screen app.
pub fn is_standalone() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(display-mode: standalone)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Decide whether to show the "Add to Home Screen" prompt.
pub fn should_show_install_prompt(
    platform: Platform,
    standalone: bool,
    dismissed_at_ms: Option<i64>,
    now_ms: i64,
    cooldown_days: u32,
) -> bool {
    if !platform.is_ios() || standalone {
        return false;
    }
    match dismissed_at_ms {
        None => true,
        Some(at) => now_ms.saturating_sub(at) >= i64::from(cooldown_days) * MS_PER_DAY,
    }
}

/// Last dismissal of the install prompt, if any.
pub fn install_prompt_dismissed_at() -> Option<i64> {
    storage::load_json(StorageKey::InstallPromptDismissedAt)
}

/// Record that the user dismissed the install prompt at `now_ms`.
pub fn dismiss_install_prompt(now_ms: i64) {
    storage::save_json(StorageKey::InstallPromptDismissedAt, &now_ms);
}

/// Returns `true` exactly once per device: the first time it is called
/// after the user's first grocery batch.
pub fn claim_first_batch_prompt() -> bool {
    let shown = storage::load_json::<bool>(StorageKey::FirstBatchInstallPromptShown).unwrap_or(false);
    if shown {
        return false;
    }
    storage::save_json(StorageKey::FirstBatchInstallPromptShown, &true);
    true
}
