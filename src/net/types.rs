//! Wire DTOs for the backend auth and user endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `GET /users/me`.
///
/// Also the shape cached in durable storage under the `user` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role name (e.g. `"user"`, `"admin"`, `"dev"`), if the backend sent one.
    #[serde(default)]
    pub role: Option<String>,
}

/// Body returned by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}
