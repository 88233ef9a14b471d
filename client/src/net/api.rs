//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. A `404` from the lookup
//! endpoint is the "not found" answer, not a failure; every other non-OK
//! status becomes an `ApiError` carrying the server's `{code, message}` body
//! when one is present.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::types::{ApiError, Credential, UserRecord};
#[cfg(feature = "hydrate")]
use super::types::ExistsResponse;

pub const CHECK_USER_ENDPOINT: &str = "/api/users/check";

#[cfg(any(test, feature = "hydrate"))]
fn user_exists_endpoint(user_id: &str) -> String {
    format!("/api/users/{user_id}/exists")
}

/// Map a non-OK status to an `ApiError`, preferring the server's own body.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: Option<ApiError>) -> ApiError {
    body.unwrap_or_else(|| ApiError::new(format!("HTTP_{status}"), "request failed"))
}

#[cfg(any(test, feature = "hydrate"))]
fn network_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::new("NETWORK", err.to_string())
}

/// Seam between the login flow and whatever answers "does this user exist".
pub trait UserLookup {
    /// Resolve a credential to the matching user, `None` when no user matches.
    fn check_user(&self, credential: &Credential) -> impl Future<Output = Result<Option<UserRecord>, ApiError>>;

    /// Whether a user with this id is still present.
    fn user_exists(&self, user_id: &str) -> impl Future<Output = Result<bool, ApiError>>;
}

/// `UserLookup` backed by the server's REST endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpLookup;

impl UserLookup for HttpLookup {
    async fn check_user(&self, credential: &Credential) -> Result<Option<UserRecord>, ApiError> {
        check_user(credential).await
    }

    async fn user_exists(&self, user_id: &str) -> Result<bool, ApiError> {
        user_exists(user_id).await
    }
}

/// Look a credential up via `POST /api/users/check`.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails, the server answers with a
/// non-OK status other than `404`, or the body cannot be decoded.
pub async fn check_user(credential: &Credential) -> Result<Option<UserRecord>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(CHECK_USER_ENDPOINT)
            .json(credential)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        match resp.status() {
            404 => Ok(None),
            _ if resp.ok() => resp
                .json::<UserRecord>()
                .await
                .map(Some)
                .map_err(|e| ApiError::new("DECODE", e.to_string())),
            status => {
                let body = resp.json::<ApiError>().await.ok();
                Err(status_error(status, body))
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credential;
        Err(ApiError::new("UNAVAILABLE", "not available on server"))
    }
}

/// Ask `GET /api/users/{id}/exists` whether a remembered user is still valid.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails or the server responds with a
/// non-OK status.
pub async fn user_exists(user_id: &str) -> Result<bool, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = user_exists_endpoint(user_id);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(network_error)?;
        if !resp.ok() {
            let body = resp.json::<ApiError>().await.ok();
            return Err(status_error(resp.status(), body));
        }
        let body: ExistsResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::new("DECODE", e.to_string()))?;
        Ok(body.exists)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user_id;
        Err(ApiError::new("UNAVAILABLE", "not available on server"))
    }
}
