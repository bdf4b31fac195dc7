//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and user-aware pages to coordinate login redirects and
//! role checks. Only [`SessionStore`](super::session::SessionStore) writes it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Where the session sits in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    /// Token and cached user restored from storage, not yet verified.
    Optimistic,
    /// Profile fetched successfully with the current token.
    Authenticated,
    /// Verification failed because the backend could not be reached.
    OfflineAuthenticated,
}

/// Authentication state for the current tab.
///
/// `is_auth` implies `token` is present and non-empty. A `user` may linger
/// without `is_auth` only transiently; every clearing path drops both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_auth: bool,
    /// Set once `init` has run in this page lifetime.
    pub initialized: bool,
    pub phase: SessionPhase,
}

impl AuthState {
    /// Role of the current user, if any.
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.role.as_deref())
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Drop credentials and profile, keeping `initialized` as is.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.is_auth = false;
        self.phase = SessionPhase::Unauthenticated;
    }
}
