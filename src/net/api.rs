//! REST API helpers for the backend auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call reports
//! [`ApiError::Unreachable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are tagged by whether an HTTP status was obtained at all, so the
//! session store can tell an offline backend from a rejected credential
//! without inspecting error text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginResponse, User};
use crate::config::ApiConfig;

/// Transport-level failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No HTTP status was obtained (network failure, CORS, DNS, server down).
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, if one was obtained.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Unreachable(_) | Self::Decode(_) => None,
        }
    }
}

/// Backend operations the session store depends on. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for an access token via `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend is unreachable, rejects the
    /// credentials, or answers with an unexpected body.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Fetch the profile for `token` via `GET /users/me`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend is unreachable, rejects the
    /// token, or answers with an unexpected body.
    async fn fetch_me(&self, token: &str) -> Result<User, ApiError>;
}

/// [`AuthApi`] backed by real HTTP requests against [`ApiConfig::api_base`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAuthApi {
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(not(feature = "hydrate"))]
fn not_in_browser() -> ApiError {
    ApiError::Unreachable("not available on server".to_owned())
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let form = web_sys::UrlSearchParams::new().map_err(|e| ApiError::Unreachable(format!("{e:?}")))?;
            form.append("username", username);
            form.append("password", password);

            let resp = gloo_net::http::Request::post(&self.config.login_url())
                .body(form)
                .map_err(|e| ApiError::Unreachable(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Unreachable(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            resp.json::<LoginResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(not_in_browser())
        }
    }

    async fn fetch_me(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.config.me_url())
                .header("Authorization", &bearer_header(token))
                .send()
                .await
                .map_err(|e| ApiError::Unreachable(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            resp.json::<User>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(not_in_browser())
        }
    }
}
