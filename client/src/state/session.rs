//! Session-wide reactions to REST failures.
//!
//! ERROR HANDLING
//! ==============
//! Session expiry and plan limits are app-level conditions: they raise a
//! banner or an upgrade prompt once, regardless of which page hit them.
//! Everything else stays local to the caller as a message string.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::net::error::ApiError;

/// Which sign-in notice the app shows, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthNotice {
    /// A token was sent and rejected (HTTP 401).
    Expired,
    /// No token stored: never signed in, or signed out.
    SignIn,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The backend rejected the bearer token; show the re-auth banner.
    pub session_expired: bool,
    /// No token is stored; show a sign-in prompt.
    pub sign_in_required: bool,
    /// Set when a plan limit was hit; holds the prompt text.
    pub upgrade_prompt: Option<String>,
}

impl SessionState {
    /// Route `err` to a session flag if it is session-wide.
    ///
    /// Returns `None` when absorbed, otherwise the message the caller should
    /// show locally.
    pub fn absorb(&mut self, err: &ApiError) -> Option<String> {
        match err {
            ApiError::SessionExpired => {
                self.session_expired = true;
                None
            }
            ApiError::MissingToken => {
                self.sign_in_required = true;
                None
            }
            ApiError::LimitExceeded { .. } => {
                self.upgrade_prompt = Some(err.user_message());
                None
            }
            _ => Some(err.user_message()),
        }
    }

    pub fn dismiss_upgrade(&mut self) {
        self.upgrade_prompt = None;
    }

    /// Called after the user signs in.
    pub fn clear_expired(&mut self) {
        self.session_expired = false;
        self.sign_in_required = false;
    }

    /// The token was removed, or there never was one.
    pub fn signed_out(&mut self) {
        self.session_expired = false;
        self.sign_in_required = true;
    }

    pub fn notice(&self) -> Option<AuthNotice> {
        if self.session_expired {
            Some(AuthNotice::Expired)
        } else if self.sign_in_required {
            Some(AuthNotice::SignIn)
        } else {
            None
        }
    }
}

/// Log `err` for `context` and absorb it into the shared session state.
///
/// Returns the message for a component-local error line, if any.
pub fn report(session: RwSignal<SessionState>, context: &str, err: &ApiError) -> Option<String> {
    leptos::logging::warn!("{context} failed: {err}");
    let mut local = None;
    session.update(|s| local = s.absorb(err));
    local
}
