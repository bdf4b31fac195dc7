//! Profile page showing the signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::net::types::User;
use crate::state::auth::SessionPhase;
use crate::util::guard::{PROFILE_PATH, install_route_guard};

/// Profile page. Redirects to `/login` when there is no session, including
/// right after the user logs out here.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    install_route_guard(session.clone(), PROFILE_PATH, None, use_navigate());
    let auth = session.state();

    let field = move |pick: fn(&User) -> Option<String>| {
        move || auth.with(|s| s.user.as_ref().and_then(pick)).unwrap_or_else(|| "n/a".to_owned())
    };

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            <Show when=move || auth.with(|s| s.phase == SessionPhase::OfflineAuthenticated)>
                <p class="profile-offline">"Offline: showing cached profile."</p>
            </Show>
            <dl class="profile-fields">
                <dt>"Username"</dt>
                <dd>{field(|u| Some(u.username.clone()))}</dd>
                <dt>"Email"</dt>
                <dd>{field(|u| Some(u.email.clone()))}</dd>
                <dt>"Phone"</dt>
                <dd>{field(|u| u.phone.clone())}</dd>
                <dt>"Role"</dt>
                <dd>{field(|u| u.role.clone())}</dd>
            </dl>
            <button class="logout-button" on:click=move |_| session.logout()>
                "Log out"
            </button>
        </div>
    }
}
