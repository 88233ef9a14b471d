//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the user lookup API and stitches it with Leptos SSR
//! rendering under a single Axum router. The admin app lives under `/admin`;
//! `/` redirects there through the client router.

pub mod users;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Lookup API routes used by the login page and its guard.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/users/check", post(users::check_user))
        .route("/api/users/{id}/exists", get(users::user_exists))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR + static site assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM/CSS bundle under /pkg, form icons copied from client/public.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .nest_service("/icons", ServeDir::new(site_root_path.join("icons"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
