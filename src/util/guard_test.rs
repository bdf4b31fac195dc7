use super::*;
use crate::net::api::ApiError;
use crate::net::types::{LoginResponse, User};
use crate::state::session::{TOKEN_KEY, USER_KEY};
use crate::util::storage::MemoryStorage;
use futures::executor::block_on;

fn user(role: Option<&str>) -> User {
    User {
        id: 3,
        username: "carol".to_owned(),
        email: "carol@example.com".to_owned(),
        phone: None,
        role: role.map(str::to_owned),
    }
}

fn signed_in(role: Option<&str>) -> AuthState {
    AuthState {
        token: Some("T".to_owned()),
        user: Some(user(role)),
        is_auth: true,
        initialized: true,
        ..AuthState::default()
    }
}

fn signed_out() -> AuthState {
    AuthState { initialized: true, ..AuthState::default() }
}

/// Answers every profile request with the same user.
struct StubApi {
    me: Result<User, ApiError>,
}

#[async_trait::async_trait(?Send)]
impl AuthApi for StubApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        Err(ApiError::Status(401))
    }

    async fn fetch_me(&self, _token: &str) -> Result<User, ApiError> {
        self.me.clone()
    }
}

fn stored(role: &str) -> MemoryStorage {
    MemoryStorage::new()
        .with_entry(TOKEN_KEY, "T")
        .with_entry(USER_KEY, &serde_json::to_string(&user(Some(role))).unwrap())
}

// =============================================================
// Redirect / RequiredRoles
// =============================================================

#[test]
fn redirect_paths_are_fixed() {
    assert_eq!(Redirect::Login.path(), "/login");
    assert_eq!(Redirect::Forbidden.path(), "/403");
    assert_eq!(Redirect::Profile.path(), "/profile");
}

#[test]
fn admin_prefix_requires_admin_role() {
    assert_eq!(RequiredRoles::for_path("/admin"), Some(RequiredRoles::new(["admin"])));
    assert_eq!(RequiredRoles::for_path("/admin/users"), Some(RequiredRoles::new(["admin"])));
}

#[test]
fn non_admin_paths_have_no_requirement() {
    assert_eq!(RequiredRoles::for_path("/profile"), None);
    assert_eq!(RequiredRoles::for_path("/administrator"), None);
    assert_eq!(RequiredRoles::for_path("/"), None);
}

#[test]
fn allows_listed_roles_and_override() {
    let roles = RequiredRoles::new(["admin", "manager"]);
    assert!(roles.allows(Some("admin")));
    assert!(roles.allows(Some("manager")));
    assert!(roles.allows(Some("dev")));
    assert!(!roles.allows(Some("user")));
    assert!(!roles.allows(None));
}

// =============================================================
// check_auth
// =============================================================

#[test]
fn unauthenticated_user_is_sent_to_login() {
    assert_eq!(check_auth("/profile", &signed_out()), Some(Redirect::Login));
}

#[test]
fn unauthenticated_user_may_open_login() {
    assert_eq!(check_auth("/login", &signed_out()), None);
}

#[test]
fn authenticated_user_is_sent_away_from_login() {
    assert_eq!(check_auth("/login", &signed_in(Some("user"))), Some(Redirect::Profile));
    assert_eq!(check_auth("/login/", &signed_in(Some("user"))), Some(Redirect::Profile));
}

#[test]
fn authenticated_user_passes_auth_guard() {
    assert_eq!(check_auth("/profile", &signed_in(Some("user"))), None);
}

// =============================================================
// check_role / evaluate
// =============================================================

#[test]
fn role_guard_is_noop_without_requirement() {
    assert_eq!(check_role(None, &signed_out()), None);
    assert_eq!(check_role(None, &signed_in(None)), None);
}

#[test]
fn role_guard_sends_unauthenticated_to_login() {
    let roles = RequiredRoles::new(["admin"]);
    assert_eq!(check_role(Some(&roles), &signed_out()), Some(Redirect::Login));
}

#[test]
fn role_guard_forbids_missing_or_wrong_role() {
    let roles = RequiredRoles::new(["admin"]);
    assert_eq!(check_role(Some(&roles), &signed_in(Some("user"))), Some(Redirect::Forbidden));
    assert_eq!(check_role(Some(&roles), &signed_in(None)), Some(Redirect::Forbidden));
}

#[test]
fn admin_route_as_user_is_forbidden() {
    let required = RequiredRoles::for_path("/admin");
    assert_eq!(
        evaluate("/admin", required.as_ref(), &signed_in(Some("user"))),
        Some(Redirect::Forbidden)
    );
}

#[test]
fn admin_route_as_admin_or_dev_is_allowed() {
    let required = RequiredRoles::for_path("/admin");
    assert_eq!(evaluate("/admin", required.as_ref(), &signed_in(Some("admin"))), None);
    assert_eq!(evaluate("/admin", required.as_ref(), &signed_in(Some("dev"))), None);
}

#[test]
fn auth_guard_runs_before_role_guard() {
    let required = RequiredRoles::new(["admin"]);
    assert_eq!(evaluate("/admin", Some(&required), &signed_out()), Some(Redirect::Login));
}

// =============================================================
// guard_navigation
// =============================================================

#[test]
fn guard_navigation_restores_session_before_deciding() {
    let store = SessionStore::new(StubApi { me: Ok(user(Some("admin"))) }, stored("admin"));
    let required = RequiredRoles::for_path("/admin");

    let decision = block_on(guard_navigation(&store, "/admin", required.as_ref()));
    assert_eq!(decision, None);
    assert!(store.is_auth());
}

#[test]
fn guard_navigation_forbids_user_on_admin_route() {
    let store = SessionStore::new(StubApi { me: Ok(user(Some("user"))) }, stored("user"));
    let required = RequiredRoles::for_path("/admin");

    let decision = block_on(guard_navigation(&store, "/admin", required.as_ref()));
    assert_eq!(decision, Some(Redirect::Forbidden));
}

#[test]
fn guard_navigation_redirects_expired_session_to_login() {
    let store = SessionStore::new(StubApi { me: Err(ApiError::Status(401)) }, stored("user"));

    let decision = block_on(guard_navigation(&store, "/profile", None));
    assert_eq!(decision, Some(Redirect::Login));
    assert!(store.storage().is_empty());
}

#[test]
fn guard_navigation_allows_offline_session() {
    let store = SessionStore::new(
        StubApi { me: Err(ApiError::Unreachable("offline".into())) },
        stored("user"),
    );

    let decision = block_on(guard_navigation(&store, "/profile", None));
    assert_eq!(decision, None);
}

#[test]
fn guard_navigation_sends_authenticated_user_from_login_to_profile() {
    let store = SessionStore::new(StubApi { me: Ok(user(Some("user"))) }, stored("user"));

    let decision = block_on(guard_navigation(&store, "/login", None));
    assert_eq!(decision, Some(Redirect::Profile));
}

// =============================================================
// suppress_while
// =============================================================

#[test]
fn suppress_while_drops_redirects_until_released() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let visited = Rc::new(RefCell::new(Vec::<String>::new()));
    let record = {
        let visited = Rc::clone(&visited);
        move |path: &str, _options: NavigateOptions| visited.borrow_mut().push(path.to_owned())
    };
    let busy = RwSignal::new(true);
    let navigate = suppress_while(busy, record);

    // Token accepted mid-login: the guard would bounce the form to /profile.
    let mid_login = AuthState { token: Some("T".into()), is_auth: true, ..AuthState::default() };
    if let Some(redirect) = evaluate("/login", None, &mid_login) {
        navigate(redirect.path(), NavigateOptions::default());
    }
    assert!(visited.borrow().is_empty());

    busy.set(false);
    navigate(PROFILE_PATH, NavigateOptions::default());
    assert_eq!(*visited.borrow(), vec!["/profile".to_owned()]);
}
