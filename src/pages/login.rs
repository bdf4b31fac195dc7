//! Login page with a username/password form.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::util::guard::{LOGIN_PATH, install_route_guard, suppress_while};

/// Login page. Already-authenticated visitors are sent on to `/profile`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // `login` marks the session authenticated before the profile arrives; the
    // form decides where to go once the whole exchange has settled.
    install_route_guard(session.clone(), LOGIN_PATH, None, suppress_while(busy, navigate.clone()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            let username_value = username.get();
            let password_value = password.get();
            leptos::task::spawn_local(async move {
                match session.login(&username_value, &password_value).await {
                    Ok(_) => {
                        password.set(String::new());
                        navigate(crate::util::guard::PROFILE_PATH, leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        // Token accepted but profile failed: drop the half-built session.
                        if session.is_auth() {
                            session.logout();
                        }
                        error.set(Some(e.to_string()));
                    }
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
