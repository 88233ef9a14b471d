//! Root application component with routing.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::pages::{home::HomePage, login::LoginPage};

pub const HOME_ROUTE: &str = "/admin";
pub const LOGIN_ROUTE: &str = "/admin/login";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/estate-admin.css"/>
        <Title text="Real Estate Admin"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                <Route path=StaticSegment("admin") view=HomePage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=HOME_ROUTE/> }/>
            </Routes>
        </Router>
    }
}
