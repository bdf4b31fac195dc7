//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ApiConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{admin::AdminPage, forbidden::ForbiddenPage, login::LoginPage, profile::ProfilePage};
use crate::state::session::SessionStore;
use crate::util::storage::BrowserStorage;

/// The session store as provided to pages through context.
pub type AppSession = SessionStore<HttpAuthApi, BrowserStorage>;

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
///
/// Owns the one session store for this tab and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: AppSession = SessionStore::new(HttpAuthApi::new(ApiConfig::from_env()), BrowserStorage);
    provide_context(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/car-auth.css"/>
        <Title text="Car"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
                <Route path=StaticSegment("403") view=ForbiddenPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/profile"/> }/>
            </Routes>
        </Router>
    }
}
