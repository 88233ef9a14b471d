//! Admin home page. Only authenticated visitors see its layout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::guard::{GuardState, GuardedPage, guard_renders};
use crate::util::auth::{install_guard_redirect, spawn_guard_check};
use crate::util::strings::{Language, Strings};

/// Home route; redirects to the login page when no session is remembered.
#[component]
pub fn HomePage() -> impl IntoView {
    let guard = RwSignal::new(GuardState::Unknown);
    spawn_guard_check(guard);
    install_guard_redirect(guard, GuardedPage::Home, use_navigate());

    let strings = Strings::load(Language::English);

    view! {
        <Show when=move || guard_renders(GuardedPage::Home, guard.get())>
            <HomeLayout strings=strings.clone()/>
        </Show>
    }
}

#[component]
fn HomeLayout(strings: Strings) -> impl IntoView {
    view! {
        <main class="admin-home">
            <h1 class="admin-home__title">{strings.get_or_default("home_heading")}</h1>
        </main>
    }
}
