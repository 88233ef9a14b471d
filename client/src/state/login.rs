//! Login form state machine.
//!
//! DESIGN
//! ======
//! `LoginState` is a plain value with pure transitions (`submit`, `resolve`,
//! `clear_error`, `toggle_password_visibility`). The page keeps it in an
//! `RwSignal` and re-renders from it; `process_user` drives one submit
//! through the lookup without knowing about Leptos, so the whole flow is
//! testable natively.
//!
//! STATES
//! ======
//! `NotActive` -> `Active` on a valid submit, then either the terminal
//! signed-in exit or `Error`. `Error` returns to `NotActive` when the auto
//! clear for that same error entry fires. Each `Error` entry gets a fresh
//! epoch so a timer from an earlier error can never clear a later one.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::cell::RefCell;

use crate::net::api::UserLookup;
use crate::net::types::{ApiError, Credential, UserRecord};
use crate::state::session::remember_logged_in;
use crate::util::storage::KeyValueStore;

/// Delay before an error message clears itself.
pub const ERROR_CLEAR_DELAY_MS: u64 = 2000;

pub const CHECKING_MESSAGE: &str = "PLEASE HOLD ON WHILE I CHECK IF THE USER IS IN THE SYSTEM";
pub const WELCOME_MESSAGE: &str = "WELCOME BACK";

pub const USERNAME_INPUT_ID: &str = "usernameInput";
pub const PASSWORD_INPUT_ID: &str = "passwordInput";

pub const USERNAME_ICON: &str = "/icons/user.svg";
pub const PASSWORD_ICON: &str = "/icons/password.svg";
pub const VISIBLE_ICON: &str = "/icons/visible.svg";
pub const HIDDEN_ICON: &str = "/icons/hidden.svg";

/// Progress of the form; exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Progress {
    #[default]
    NotActive,
    Active,
    Error,
}

/// Everything that can put the form into `Progress::Error`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("input fields are empty")]
    EmptyFields,
    #[error("user doesn't exist")]
    UserNotFound,
    #[error("{code}: {message}")]
    Server { code: String, message: String },
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        Self::Server { code: err.code, message: err.message }
    }
}

/// Result of pressing submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submit {
    /// Inputs were valid; the form is now `Active` and waits on this lookup.
    Check(Credential),
    /// Validation failed; the form is in `Error` under `epoch`.
    Rejected { epoch: u64 },
    /// A lookup is already outstanding or the form has signed in.
    Ignored,
}

/// Result of feeding a lookup answer back into the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    SignedIn(UserRecord),
    Failed { epoch: u64 },
    /// No lookup was outstanding.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    pub progress: Progress,
    pub message: String,
    pub password_visible: bool,
    /// Set once a lookup found the user; the form accepts nothing after.
    pub signed_in: bool,
    error_epoch: u64,
}

impl LoginState {
    pub fn submit(&mut self, username: &str, password: &str) -> Submit {
        if self.progress == Progress::Active || self.signed_in {
            return Submit::Ignored;
        }
        match validate_credential(username, password) {
            Ok(credential) => {
                self.progress = Progress::Active;
                CHECKING_MESSAGE.clone_into(&mut self.message);
                Submit::Check(credential)
            }
            Err(err) => Submit::Rejected { epoch: self.fail(&err) },
        }
    }

    pub fn resolve(&mut self, result: Result<Option<UserRecord>, ApiError>) -> Resolution {
        if self.progress != Progress::Active || self.signed_in {
            return Resolution::Ignored;
        }
        match result {
            Ok(Some(user)) => {
                WELCOME_MESSAGE.clone_into(&mut self.message);
                self.signed_in = true;
                Resolution::SignedIn(user)
            }
            Ok(None) => Resolution::Failed { epoch: self.fail(&LoginError::UserNotFound) },
            Err(err) => Resolution::Failed { epoch: self.fail(&LoginError::from(err)) },
        }
    }

    /// Enter `Error` showing `err`; returns the epoch its auto clear must use.
    pub fn fail(&mut self, err: &LoginError) -> u64 {
        self.progress = Progress::Error;
        self.message = err.to_string();
        self.error_epoch += 1;
        self.error_epoch
    }

    /// Return to `NotActive` if the form is still showing the error from `epoch`.
    pub fn clear_error(&mut self, epoch: u64) -> bool {
        if self.progress != Progress::Error || self.error_epoch != epoch {
            return false;
        }
        self.progress = Progress::NotActive;
        self.message.clear();
        true
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    #[must_use]
    pub fn inputs_disabled(&self) -> bool {
        self.progress == Progress::Active
    }

    #[must_use]
    pub fn shows_submit(&self) -> bool {
        self.progress != Progress::Active
    }

    #[must_use]
    pub fn shows_message(&self) -> bool {
        matches!(self.progress, Progress::Active | Progress::Error)
    }

    #[must_use]
    pub fn password_input_type(&self) -> &'static str {
        if self.password_visible { "text" } else { "password" }
    }

    #[must_use]
    pub fn password_icon(&self) -> &'static str {
        if self.password_visible { VISIBLE_ICON } else { HIDDEN_ICON }
    }
}

/// Both fields must be non-empty. Whitespace counts as content.
///
/// # Errors
///
/// Returns `LoginError::EmptyFields` when either field is empty.
pub fn validate_credential(username: &str, password: &str) -> Result<Credential, LoginError> {
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::EmptyFields);
    }
    Ok(Credential { username: username.to_owned(), password: password.to_owned() })
}

/// Somewhere a `LoginState` lives. `None` means the owner is gone.
pub trait LoginCell {
    fn modify<R>(&self, f: impl FnOnce(&mut LoginState) -> R) -> Option<R>;
}

impl LoginCell for RefCell<LoginState> {
    fn modify<R>(&self, f: impl FnOnce(&mut LoginState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// How one pass through `process_user` ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    Ignored,
    SignedIn(UserRecord),
    /// The form is in `Error`; schedule `clear_error(epoch)`.
    Failed { epoch: u64 },
    /// The form went away while the lookup was in flight.
    Detached,
}

/// Run one submit: validate, look the user up, then remember and navigate on
/// success. The lookup is only called for a valid, non-ignored submit.
pub async fn process_user<C, L, S, N>(
    cell: &C,
    lookup: &L,
    store: &S,
    username: &str,
    password: &str,
    navigate_home: N,
) -> FlowOutcome
where
    C: LoginCell,
    L: UserLookup,
    S: KeyValueStore,
    N: FnOnce(),
{
    let Some(submit) = cell.modify(|state| state.submit(username, password)) else {
        return FlowOutcome::Detached;
    };
    let credential = match submit {
        Submit::Check(credential) => credential,
        Submit::Rejected { epoch } => return FlowOutcome::Failed { epoch },
        Submit::Ignored => return FlowOutcome::Ignored,
    };

    let result = lookup.check_user(&credential).await;
    let Some(resolution) = cell.modify(|state| state.resolve(result)) else {
        return FlowOutcome::Detached;
    };

    match resolution {
        Resolution::SignedIn(user) => {
            if let Err(_e) = remember_logged_in(store, true, &user) {
                #[cfg(feature = "hydrate")]
                log::warn!("could not remember login for {}: {_e}", user.username);
            }
            navigate_home();
            FlowOutcome::SignedIn(user)
        }
        Resolution::Failed { epoch } => FlowOutcome::Failed { epoch },
        Resolution::Ignored => FlowOutcome::Ignored,
    }
}
