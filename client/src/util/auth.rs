//! Shared auth guard wiring for admin pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both admin routes run the same remembered-session check and differ only
//! in which outcome sends the visitor elsewhere.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::guard::{GuardState, GuardedPage, guard_redirect};

/// Run the remembered-session check once and publish its result into `guard`.
///
/// Server rendering leaves the guard `Unknown`, so the page renders nothing
/// until hydration resolves it.
pub fn spawn_guard_check(guard: RwSignal<GuardState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::api::HttpLookup;
        use crate::state::guard::check_remembered_session;
        use crate::util::storage::BrowserStorage;

        let state = check_remembered_session(&HttpLookup, &BrowserStorage).await;
        log::debug!("auth guard resolved: {state:?}");
        let _ = guard.try_set(state);
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = guard;
    }
}

/// Navigate away from `page` as soon as the guard resolves to a redirect.
pub fn install_guard_redirect<F>(guard: RwSignal<GuardState>, page: GuardedPage, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(route) = guard_redirect(page, guard.get()) {
            navigate(route, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
