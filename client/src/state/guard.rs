//! Page-entry authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both admin pages start in `Unknown`, render nothing determinate, and run
//! `check_remembered_session` once. The login page leaves for home when the
//! visitor is already known; the home page leaves for login when not.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::api::UserLookup;
use crate::state::session::read_session;
use crate::util::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Unknown,
    Authenticated,
    Anonymous,
}

/// Which admin page a guard is protecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardedPage {
    Login,
    Home,
}

/// Resolve the guard from storage, re-validating a remembered user id with
/// the server. Any lookup failure counts as anonymous.
pub async fn check_remembered_session<L, S>(lookup: &L, store: &S) -> GuardState
where
    L: UserLookup,
    S: KeyValueStore,
{
    let Some(flag) = read_session(store) else {
        return GuardState::Anonymous;
    };
    if !flag.is_remembered() {
        return GuardState::Anonymous;
    }
    match lookup.user_exists(&flag.user_id).await {
        Ok(true) => GuardState::Authenticated,
        Ok(false) => GuardState::Anonymous,
        Err(_e) => {
            #[cfg(feature = "hydrate")]
            log::warn!("remembered session check failed: {_e}");
            GuardState::Anonymous
        }
    }
}

/// Route to leave `page` for, if any, once the guard has resolved.
#[must_use]
pub fn guard_redirect(page: GuardedPage, state: GuardState) -> Option<&'static str> {
    match (page, state) {
        (GuardedPage::Login, GuardState::Authenticated) => Some(crate::app::HOME_ROUTE),
        (GuardedPage::Home, GuardState::Anonymous) => Some(crate::app::LOGIN_ROUTE),
        _ => None,
    }
}

/// Whether `page` should render its own content for `state`.
#[must_use]
pub fn guard_renders(page: GuardedPage, state: GuardState) -> bool {
    match page {
        GuardedPage::Login => state == GuardState::Anonymous,
        GuardedPage::Home => state == GuardState::Authenticated,
    }
}
