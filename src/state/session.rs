//! Session store: token/user lifecycle against the backend and durable storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one store per tab and provides it through context. Route
//! guards call [`SessionStore::init`] before inspecting state; the login page
//! calls [`SessionStore::login`]; the profile page calls
//! [`SessionStore::logout`].
//!
//! ERROR HANDLING
//! ==============
//! `login` and `fetch_me` surface [`AuthError`] to their callers. `init`
//! interprets `fetch_me` failures itself: an unreachable backend keeps the
//! optimistic session (offline), an answer for a token that has since been
//! replaced is ignored, anything else logs out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use super::auth::{AuthState, SessionPhase};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::User;
use crate::util::storage::{KeyValueStore, load_json, save_json};

/// Storage key for the raw bearer token.
pub const TOKEN_KEY: &str = "access_token";
/// Storage key for the JSON-serialized cached user.
pub const USER_KEY: &str = "user";

/// Failures surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// An operation needing a token ran without one.
    #[error("not signed in: no access token")]
    MissingCredential,

    /// The backend could not be reached at all.
    #[error("cannot reach the server, check your connection")]
    BackendUnreachable,

    /// The backend rejected the stored token (401).
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// The backend rejected the username/password pair (401).
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The backend rejected the login form as malformed (422).
    #[error("login form data is malformed")]
    MalformedRequest,

    #[error("failed to load profile (status {status})")]
    ProfileFetchFailed { status: u16 },

    #[error("login failed (status {status})")]
    LoginFailed { status: u16 },

    /// The backend answered successfully with a body we could not use.
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The token changed (logout or a newer login) while the request was in
    /// flight; the answer belongs to a session that no longer exists.
    #[error("session changed while the request was in flight")]
    Superseded,
}

impl AuthError {
    /// True when no HTTP status was obtained.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::BackendUnreachable)
    }

    fn from_profile_failure(err: ApiError) -> Self {
        match (err.status(), err) {
            (Some(401), _) => Self::SessionExpired,
            (Some(status), _) => Self::ProfileFetchFailed { status },
            (None, ApiError::Decode(msg)) => Self::InvalidResponse(msg),
            (None, _) => Self::BackendUnreachable,
        }
    }

    fn from_login_failure(err: ApiError) -> Self {
        match (err.status(), err) {
            (Some(401), _) => Self::InvalidCredentials,
            (Some(422), _) => Self::MalformedRequest,
            (Some(status), _) => Self::LoginFailed { status },
            (None, ApiError::Decode(msg)) => Self::InvalidResponse(msg),
            (None, _) => Self::BackendUnreachable,
        }
    }
}

/// Owns the reactive [`AuthState`] and the operations that mutate it.
///
/// Clones share the same state signal, so the store can be handed to guards,
/// pages and spawned tasks freely.
#[derive(Clone)]
pub struct SessionStore<A, S> {
    state: RwSignal<AuthState>,
    api: A,
    storage: S,
}

impl<A, S> SessionStore<A, S>
where
    A: AuthApi,
    S: KeyValueStore,
{
    pub fn new(api: A, storage: S) -> Self {
        Self { state: RwSignal::new(AuthState::default()), api, storage }
    }

    /// Reactive handle for views that re-render on session changes.
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    /// Current state without subscribing.
    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn is_auth(&self) -> bool {
        self.state.with_untracked(|s| s.is_auth)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore the session from durable storage and validate it, once per
    /// page lifetime.
    ///
    /// Does nothing outside a browser context. Never fails: an unreachable
    /// backend leaves the optimistic session in place, any other validation
    /// failure logs out.
    pub async fn init(&self) {
        if self.state.with_untracked(|s| s.initialized) {
            return;
        }
        self.state.update(|s| s.initialized = true);

        if !self.storage.is_available() {
            return;
        }

        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            self.state.update(AuthState::clear);
            return;
        };
        let cached: Option<User> = load_json(&self.storage, USER_KEY);

        self.state.update(|s| {
            s.token = Some(token);
            s.user = cached;
            s.is_auth = true;
            s.phase = SessionPhase::Optimistic;
        });

        match self.fetch_me().await {
            Ok(user) => leptos::logging::log!("session restored for {}", user.username),
            Err(AuthError::Superseded) => leptos::logging::log!("stored session replaced before validation finished"),
            Err(e) if e.is_unreachable() => {
                leptos::logging::warn!("backend unreachable, keeping cached session");
                self.state.update(|s| s.phase = SessionPhase::OfflineAuthenticated);
            }
            Err(e) => {
                leptos::logging::warn!("stored session rejected: {e}");
                self.logout();
            }
        }
    }

    /// Fetch the current user's profile with the held token.
    ///
    /// On success the user is cached in storage and the session becomes
    /// authenticated. Failures leave the session untouched.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingCredential`] without a token,
    /// [`AuthError::Superseded`] when the token changed mid-request, otherwise
    /// the classified backend failure.
    pub async fn fetch_me(&self) -> Result<User, AuthError> {
        let token = self
            .state
            .with_untracked(|s| s.token.clone())
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let result = self.api.fetch_me(&token).await;

        // A logout or re-login while the request was in flight wins, whatever
        // the backend answered for the old token.
        if self.state.with_untracked(|s| s.token.as_deref() != Some(token.as_str())) {
            return Err(AuthError::Superseded);
        }

        let user = result.map_err(|e| {
            let err = AuthError::from_profile_failure(e);
            leptos::logging::warn!("profile fetch failed: {err}");
            err
        })?;

        save_json(&self.storage, USER_KEY, &user);
        self.state.update(|s| {
            s.user = Some(user.clone());
            s.is_auth = true;
            s.phase = SessionPhase::Authenticated;
        });
        Ok(user)
    }

    /// Exchange credentials for a token, persist it, then load the profile.
    ///
    /// # Errors
    ///
    /// The classified login failure, or any [`fetch_me`](Self::fetch_me)
    /// failure after the token was accepted.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let resp = self.api.login(username, password).await.map_err(|e| {
            let err = AuthError::from_login_failure(e);
            leptos::logging::warn!("login failed for {username}: {err}");
            err
        })?;
        if resp.access_token.is_empty() {
            return Err(AuthError::InvalidResponse("empty access token".to_owned()));
        }

        self.storage.set(TOKEN_KEY, &resp.access_token);
        self.state.update(|s| {
            s.token = Some(resp.access_token);
            s.is_auth = true;
            s.initialized = true;
            s.phase = SessionPhase::Optimistic;
        });

        self.fetch_me().await
    }

    /// Clear the session and wipe durable storage. Idempotent.
    pub fn logout(&self) {
        self.state.set(AuthState::default());
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}
