//! Request core shared by every REST wrapper.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: requests are prepared but never sent;
//! `send` returns [`ApiError::Unavailable`].
//!
//! Every call carries `Authorization: Bearer <token>` from device storage. A
//! missing token fails fast with [`ApiError::MissingToken`] instead of
//! issuing a request the server would reject.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
#[cfg(feature = "hydrate")]
use super::error::classify_response;
use crate::config::api_base_url;
use crate::util::storage::{self, StorageKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully resolved request, ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub authorization: String,
    pub body: Option<String>,
}

/// Join the API base URL and an absolute endpoint path.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// The stored bearer token, if non-blank.
pub fn auth_token() -> Option<String> {
    storage::with_store(|s| s.get_raw(StorageKey::AuthToken))
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

/// Store a bearer token handed over by the sign-in flow.
pub fn set_auth_token(token: &str) {
    if let Err(e) = storage::with_store(|s| s.set_raw(StorageKey::AuthToken, token.trim())) {
        leptos::logging::warn!("could not persist auth token: {e}");
    }
}

pub fn clear_auth_token() {
    storage::clear(StorageKey::AuthToken);
}

/// Resolve URL, auth header and JSON body for a call.
///
/// # Errors
///
/// Returns `MissingToken` when no token is stored and `Decode` when the body
/// cannot be serialized.
pub fn prepare<B: Serialize + ?Sized>(method: Method, path: &str, body: Option<&B>) -> Result<PreparedRequest, ApiError> {
    let token = auth_token().ok_or(ApiError::MissingToken)?;
    let body = body
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(PreparedRequest {
        method,
        url: endpoint_url(api_base_url(), path),
        authorization: bearer_header(&token),
        body,
    })
}

/// Decode a JSON response body.
///
/// # Errors
///
/// Returns `Decode` when the body does not match `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Perform a prepared request and return the raw body of a 2xx response.
#[cfg(feature = "hydrate")]
async fn perform(request: PreparedRequest) -> Result<String, ApiError> {
    use gloo_net::http::Request;

    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Delete => Request::delete(&request.url),
    }
    .header("Authorization", &request.authorization)
    .header("Accept", "application/json");

    let built = match request.body {
        Some(raw) => builder.header("Content-Type", "application/json").body(raw),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
    classify_response(status, &text)?;
    Ok(text)
}

/// Send a request and decode the JSON response.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on any failure.
pub async fn send<B, T>(method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let request = prepare(method, path, body)?;
    #[cfg(feature = "hydrate")]
    {
        let text = perform(request).await?;
        decode(&text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Send a request whose response body is irrelevant.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on any failure.
pub async fn send_unit<B: Serialize + ?Sized>(method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError> {
    let request = prepare(method, path, body)?;
    #[cfg(feature = "hydrate")]
    {
        perform(request).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// `GET` and decode.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on any failure.
pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send::<(), T>(Method::Get, path, None).await
}
