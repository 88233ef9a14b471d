//! # estate-admin-client
//!
//! Leptos + WASM frontend for the real-estate administration area: the
//! admin login screen and the admin home page.
//!
//! Pages and components live under `pages`/`components`; the login flow,
//! border pulse, page guard and remembered session are plain state types
//! under `state` so they can be tested natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
