//! REST failure taxonomy and HTTP status classification.
//!
//! ERROR HANDLING
//! ==============
//! Three signals get special routing: 401 means the session expired, 402 or
//! an `error: LIMIT_EXCEEDED` body means the subscription limit was hit, and
//! everything else is a generic failure the user retries by hand.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

pub const LIMIT_EXCEEDED: &str = "LIMIT_EXCEEDED";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("session expired")]
    SessionExpired,
    #[error("subscription limit exceeded")]
    LimitExceeded { message: Option<String> },
    #[error("request failed with status {status}")]
    Http { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("not signed in")]
    MissingToken,
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Transport-level failure, as opposed to an answer from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Text for a component-local error line.
    pub fn user_message(&self) -> String {
        match self {
            Self::SessionExpired | Self::MissingToken => "Your session has expired. Please sign in again.".to_owned(),
            Self::LimitExceeded { message } => message
                .clone()
                .unwrap_or_else(|| "You've reached your plan limit. Upgrade to keep going.".to_owned()),
            Self::Http { message: Some(message), .. } => message.clone(),
            Self::Http { .. } | Self::Decode(_) => "Something went wrong. Please try again.".to_owned(),
            Self::Network(_) => "Couldn't reach Trackabite. Check your connection and try again.".to_owned(),
            Self::Unavailable => "This action is only available in the browser.".to_owned(),
        }
    }
}

/// Classify a response by status and raw body text.
///
/// # Errors
///
/// Returns the matching [`ApiError`] for non-2xx responses, and
/// `LimitExceeded` for any response whose body carries the limit marker.
pub fn classify_response(status: u16, body: &str) -> Result<(), ApiError> {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let error_code = parsed.as_ref().and_then(|b| b.error.as_deref());
    let message = parsed.as_ref().and_then(|b| b.message.clone().or_else(|| b.error.clone()));

    if status == 402 || error_code == Some(LIMIT_EXCEEDED) {
        let message = parsed.and_then(|b| b.message);
        return Err(ApiError::LimitExceeded { message });
    }
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::SessionExpired),
        _ => Err(ApiError::Http { status, message }),
    }
}
