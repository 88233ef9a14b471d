//! Admin user lookup service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the login check and the remembered-session re-validation. Passwords
//! are never stored; rows carry a hex SHA-256 digest of `username:password`
//! and lookups compare digests.

use std::fmt::Write;

use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A user matched by credential. Serialized as the check endpoint's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundUser {
    pub id: Uuid,
    pub username: String,
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Digest stored for a username/password pair.
#[must_use]
pub fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Find the user matching both username and password.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn find_user(pool: &PgPool, username: &str, password: &str) -> Result<Option<FoundUser>, UserError> {
    let digest = password_digest(username, password);
    let row = sqlx::query("SELECT id, username FROM users WHERE username = $1 AND password_digest = $2")
        .bind(username)
        .bind(&digest)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| FoundUser { id: r.get("id"), username: r.get("username") }))
}

/// Whether a user with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn user_exists(pool: &PgPool, id: Uuid) -> Result<bool, UserError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Create the user or reset its password digest. Returns the user id.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub async fn upsert_user(pool: &PgPool, username: &str, password: &str) -> Result<Uuid, UserError> {
    let digest = password_digest(username, password);
    let row = sqlx::query(
        r"INSERT INTO users (username, password_digest)
         VALUES ($1, $2)
         ON CONFLICT (username) DO UPDATE SET password_digest = EXCLUDED.password_digest
         RETURNING id",
    )
    .bind(username)
    .bind(&digest)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
