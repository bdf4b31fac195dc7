//! Backend API configuration.
//!
//! The WASM bundle has no process environment at runtime, so the API base is
//! baked in at compile time from `CAR_API_BASE`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Location of the backend REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    /// Build config from an explicit base URL. Trailing slashes are trimmed.
    pub fn new(api_base: &str) -> Self {
        Self { api_base: api_base.trim().trim_end_matches('/').to_owned() }
    }

    /// Build config from the compile-time `CAR_API_BASE` variable.
    ///
    /// Falls back to [`DEFAULT_API_BASE`] when unset or blank.
    pub fn from_env() -> Self {
        Self::from_raw(option_env!("CAR_API_BASE"))
    }

    fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(base) if !base.is_empty() => Self::new(base),
            _ => Self::default(),
        }
    }

    /// `POST` target for username/password login.
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.api_base)
    }

    /// `GET` target for the current user's profile.
    pub fn me_url(&self) -> String {
        format!("{}/users/me", self.api_base)
    }
}
