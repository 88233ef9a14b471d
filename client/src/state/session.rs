//! Remembered-login flag persisted in browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written once by the login flow after a successful lookup and read by
//! the page guards on entry. Nothing in the admin area clears it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::UserRecord;
use crate::util::storage::{KeyValueStore, StorageError};

pub const REMEMBER_KEY: &str = "remember";
pub const USER_ID_KEY: &str = "userId";
pub const USERNAME_KEY: &str = "username";

/// Stored identity of the last signed-in admin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionFlag {
    pub remember: bool,
    pub user_id: String,
    pub username: String,
}

impl SessionFlag {
    /// True when the flag is set and names a user to re-validate.
    #[must_use]
    pub fn is_remembered(&self) -> bool {
        self.remember && !self.user_id.is_empty()
    }
}

/// Persist the remember flag and identity of `user`. The password is never
/// part of a `UserRecord` and so never reaches storage.
///
/// # Errors
///
/// Returns the first `StorageError` hit while writing the three keys.
pub fn remember_logged_in<S: KeyValueStore>(store: &S, remember: bool, user: &UserRecord) -> Result<(), StorageError> {
    store.set(REMEMBER_KEY, if remember { "true" } else { "false" })?;
    store.set(USER_ID_KEY, &user.id)?;
    store.set(USERNAME_KEY, &user.username)
}

/// Read the stored flag; `None` when no login was ever remembered.
pub fn read_session<S: KeyValueStore>(store: &S) -> Option<SessionFlag> {
    let remember = store.get(REMEMBER_KEY)?;
    Some(SessionFlag {
        remember: remember == "true",
        user_id: store.get(USER_ID_KEY).unwrap_or_default(),
        username: store.get(USERNAME_KEY).unwrap_or_default(),
    })
}
