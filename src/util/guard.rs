//! Route guards: authentication and role checks run before each navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded page applies identical redirect behavior. The decision
//! functions are pure over [`AuthState`]; [`install_route_guard`] wires them
//! to the session store and the router.
//!
//! Evaluation order is fixed: the authentication guard runs first, then the
//! role guard. The first redirect wins.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::AuthApi;
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::storage::KeyValueStore;

pub const LOGIN_PATH: &str = "/login";
pub const FORBIDDEN_PATH: &str = "/403";
pub const PROFILE_PATH: &str = "/profile";

/// Role that passes every role check.
pub const OVERRIDE_ROLE: &str = "dev";

const ADMIN_PREFIX: &str = "/admin";
const ADMIN_ROLE: &str = "admin";

/// Where a guard sends the user instead of the requested route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Forbidden,
    Profile,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Forbidden => FORBIDDEN_PATH,
            Self::Profile => PROFILE_PATH,
        }
    }
}

/// Allowed-role list attached to a route.
///
/// Routes without one skip the role guard entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredRoles(Vec<String>);

impl RequiredRoles {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    /// Roles implied by the path-prefix convention: `/admin` and anything
    /// beneath it require `admin`.
    pub fn for_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(ADMIN_PREFIX)?;
        (rest.is_empty() || rest.starts_with('/')).then(|| Self::new([ADMIN_ROLE]))
    }

    pub fn roles(&self) -> &[String] {
        &self.0
    }

    /// Whether `role` satisfies this requirement. [`OVERRIDE_ROLE`] always does.
    pub fn allows(&self, role: Option<&str>) -> bool {
        role.is_some_and(|r| r == OVERRIDE_ROLE || self.0.iter().any(|allowed| allowed == r))
    }
}

fn is_login_path(path: &str) -> bool {
    path.trim_end_matches('/') == LOGIN_PATH
}

/// Authentication guard decision for a navigation to `path`.
pub fn check_auth(path: &str, state: &AuthState) -> Option<Redirect> {
    match (is_login_path(path), state.is_auth) {
        (true, true) => Some(Redirect::Profile),
        (false, false) => Some(Redirect::Login),
        _ => None,
    }
}

/// Role guard decision. `None` for `required` means the route is unrestricted.
pub fn check_role(required: Option<&RequiredRoles>, state: &AuthState) -> Option<Redirect> {
    let required = required?;
    if !state.is_auth {
        return Some(Redirect::Login);
    }
    if required.allows(state.role()) {
        None
    } else {
        Some(Redirect::Forbidden)
    }
}

/// Run the authentication guard, then the role guard.
pub fn evaluate(path: &str, required: Option<&RequiredRoles>, state: &AuthState) -> Option<Redirect> {
    check_auth(path, state).or_else(|| check_role(required, state))
}

/// Make sure the store has had its chance to restore a session.
pub async fn ensure_initialized<A, S>(store: &SessionStore<A, S>)
where
    A: AuthApi,
    S: KeyValueStore,
{
    if !store.is_auth() {
        store.init().await;
    }
}

/// Full guard pass for one navigation against the resolved session.
pub async fn guard_navigation<A, S>(
    store: &SessionStore<A, S>,
    path: &str,
    required: Option<&RequiredRoles>,
) -> Option<Redirect>
where
    A: AuthApi,
    S: KeyValueStore,
{
    ensure_initialized(store).await;
    let decision = store.state().with_untracked(|state| evaluate(path, required, state));
    if let Some(redirect) = decision {
        leptos::logging::log!("guard: {path} -> {}", redirect.path());
    }
    decision
}

/// Wrap `navigate` so guard redirects are dropped while `held` is set.
///
/// Pages that drive the session themselves (the login form) hold redirects
/// until their own request settles, so its outcome stays on screen.
pub fn suppress_while<F>(held: RwSignal<bool>, navigate: F) -> impl Fn(&str, NavigateOptions) + Clone + 'static
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    move |path: &str, options: NavigateOptions| {
        if !held.get_untracked() {
            navigate(path, options);
        }
    }
}

/// Guard the current page: initialize the session on the client, then
/// redirect whenever the resolved session fails the checks for `path`.
///
/// Keeps watching the session, so a logout on a guarded page redirects too.
pub fn install_route_guard<A, S, F>(store: SessionStore<A, S>, path: &str, required: Option<RequiredRoles>, navigate: F)
where
    A: AuthApi + Clone + 'static,
    S: KeyValueStore + Clone + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let resolved = RwSignal::new(false);
    let auth = store.state();
    let path = path.to_owned();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        ensure_initialized(&store).await;
        resolved.set(true);
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
    }

    Effect::new(move || {
        if !resolved.get() {
            return;
        }
        let state = auth.get();
        if let Some(redirect) = evaluate(&path, required.as_ref(), &state) {
            navigate(redirect.path(), NavigateOptions::default());
        }
    });
}
