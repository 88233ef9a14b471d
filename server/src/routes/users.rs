//! User lookup routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login form posts credentials to `/api/users/check`; the page guard
//! re-validates a remembered user id via `/api/users/{id}/exists`.
//!
//! Failures carry a JSON `{code, message}` body so the client can render
//! `"{code}: {message}"` without guessing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::users;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExistsBody {
    pub exists: bool,
}

fn error_response(status: StatusCode, code: &'static str, message: &'static str) -> Response {
    (status, Json(ErrorBody { code, message })).into_response()
}

/// `POST /api/users/check` — match a username/password pair.
pub async fn check_user(State(state): State<AppState>, Json(body): Json<CheckUserRequest>) -> Response {
    if body.username.is_empty() || body.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "INPUT_EMPTY", "input fields are empty");
    }

    match users::find_user(&state.pool, &body.username, &body.password).await {
        Ok(Some(user)) => {
            tracing::debug!(username = %user.username, "user check matched");
            Json(user).into_response()
        }
        Ok(None) => {
            tracing::debug!(username = %body.username, "user check missed");
            error_response(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "user doesn't exist")
        }
        Err(e) => {
            tracing::error!(error = %e, "user lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR", "user lookup failed")
        }
    }
}

/// `GET /api/users/{id}/exists` — re-validate a remembered user id.
pub async fn user_exists(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Json(ExistsBody { exists: false }).into_response();
    };

    match users::user_exists(&state.pool, id).await {
        Ok(exists) => Json(ExistsBody { exists }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, %id, "user exists check failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR", "user lookup failed")
        }
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
