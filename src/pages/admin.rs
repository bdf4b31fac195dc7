//! Admin landing page, restricted to the `admin` role.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::util::guard::{RequiredRoles, install_route_guard};

const ADMIN_PATH: &str = "/admin";

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    install_route_guard(session.clone(), ADMIN_PATH, RequiredRoles::for_path(ADMIN_PATH), use_navigate());
    let auth = session.state();

    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <p>
                "Signed in as "
                {move || auth.with(|s| s.user.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
            </p>
        </div>
    }
}
