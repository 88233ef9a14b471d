//! Admin login page: remembered-session guard, credential form, border
//! pulse while the lookup runs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Transitions live in `state::login`; this page binds them to signals and
//! owns the scheduled work. Both the pulse loop and the error auto clear
//! check an `alive` flag that `on_cleanup` drops, and the pulse loop also
//! stops as soon as its generation is superseded.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::outlined_input::OutlinedInput;
use crate::state::guard::{GuardState, GuardedPage, guard_renders};
use crate::state::login::{
    LoginCell, LoginState, PASSWORD_ICON, PASSWORD_INPUT_ID, Progress, USERNAME_ICON, USERNAME_INPUT_ID,
};
use crate::state::pulse::{BorderPulse, border_color};
use crate::util::auth::{install_guard_redirect, spawn_guard_check};
use crate::util::strings::{Language, Strings};

impl LoginCell for RwSignal<LoginState> {
    fn modify<R>(&self, f: impl FnOnce(&mut LoginState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

fn border_style(progress: Progress, pulse: &BorderPulse) -> String {
    format!("border: 1px dashed {};", border_color(progress, pulse).to_hex())
}

fn message_class(progress: Progress) -> &'static str {
    if progress == Progress::Error { "login-message login-message--error" } else { "login-message" }
}

/// Login route. Renders nothing until the guard resolves, then either leaves
/// for home or shows the form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let guard = RwSignal::new(GuardState::Unknown);
    spawn_guard_check(guard);
    install_guard_redirect(guard, GuardedPage::Login, use_navigate());

    let strings = Strings::load(Language::English);

    view! {
        <Show when=move || guard_renders(GuardedPage::Login, guard.get())>
            <LoginLayout strings=strings.clone()/>
        </Show>
    }
}

#[component]
fn LoginLayout(strings: Strings) -> impl IntoView {
    let navigate = use_navigate();
    let state = RwSignal::new(LoginState::default());
    let pulse = RwSignal::new(BorderPulse::default());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    #[cfg(feature = "hydrate")]
    {
        let alive_pulse = alive.clone();
        Effect::new(move || {
            let progress = state.with(|s| s.progress);
            if let Some(generation) = pulse.try_update(|p| p.sync(progress)).flatten() {
                run_pulse(pulse, generation, alive_pulse.clone());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let username_value = username.get_untracked();
        let password_value = password.get_untracked();

        #[cfg(feature = "hydrate")]
        {
            use crate::app::HOME_ROUTE;
            use crate::net::api::HttpLookup;
            use crate::state::login::{FlowOutcome, process_user};
            use crate::util::storage::BrowserStorage;
            use leptos_router::NavigateOptions;

            let navigate = navigate.clone();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let outcome = process_user(&state, &HttpLookup, &BrowserStorage, &username_value, &password_value, || {
                    navigate(HOME_ROUTE, NavigateOptions::default());
                })
                .await;
                match outcome {
                    FlowOutcome::Failed { epoch } => schedule_error_clear(state, epoch, alive),
                    FlowOutcome::SignedIn(user) => log::info!("signed in as {}", user.username),
                    FlowOutcome::Detached => log::debug!("login form closed before lookup finished"),
                    FlowOutcome::Ignored => {}
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, &alive, username_value, password_value);
        }
    };

    let inputs_disabled = Signal::derive(move || state.with(LoginState::inputs_disabled));
    let password_type = Signal::derive(move || state.with(LoginState::password_input_type));
    let password_icon = Signal::derive(move || state.with(LoginState::password_icon));
    let on_toggle_password = Callback::new(move |()| state.update(LoginState::toggle_password_visibility));

    let sign_in_label = strings.get_or_default("sign_in");
    let form_style = move || {
        let progress = state.with(|s| s.progress);
        pulse.with(|p| border_style(progress, p))
    };

    view! {
        <div class="login-page">
            <form class="login-card" style=form_style on:submit=on_submit>
                <h1 class="login-card__title">{strings.get_or_default("app_name")}</h1>
                <h4 class="login-card__subtitle">{strings.get_or_default("tagline")}</h4>
                <OutlinedInput
                    id=USERNAME_INPUT_ID
                    placeholder=strings.get_or_default("username_placeholder")
                    leading_icon=USERNAME_ICON
                    value=username
                    disabled=inputs_disabled
                />
                <OutlinedInput
                    id=PASSWORD_INPUT_ID
                    placeholder=strings.get_or_default("password_placeholder")
                    leading_icon=PASSWORD_ICON
                    value=password
                    disabled=inputs_disabled
                    input_type=password_type
                    trailing_icon=password_icon
                    on_trailing_click=on_toggle_password
                />
                <Show when=move || state.with(LoginState::shows_submit)>
                    <button class="login-button" type="submit">
                        {sign_in_label.clone()}
                    </button>
                </Show>
                <Show when=move || state.with(LoginState::shows_message)>
                    <span class=move || message_class(state.with(|s| s.progress))>
                        {move || state.with(|s| s.message.clone())}
                    </span>
                </Show>
            </form>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn run_pulse(pulse: RwSignal<BorderPulse>, generation: u64, alive: Arc<AtomicBool>) {
    use crate::state::pulse::PULSE_STEP_MS;

    leptos::task::spawn_local(async move {
        while alive.load(Ordering::Relaxed) {
            if pulse.try_update(|p| p.step(generation)).flatten().is_none() {
                break;
            }
            gloo_timers::future::sleep(std::time::Duration::from_millis(PULSE_STEP_MS)).await;
        }
    });
}

#[cfg(feature = "hydrate")]
fn schedule_error_clear(state: RwSignal<LoginState>, epoch: u64, alive: Arc<AtomicBool>) {
    use crate::state::login::ERROR_CLEAR_DELAY_MS;

    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(ERROR_CLEAR_DELAY_MS)).await;
        if alive.load(Ordering::Relaxed) {
            let _ = state.try_update(|s| s.clear_error(epoch));
        }
    });
}
