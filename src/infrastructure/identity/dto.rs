use serde::{Deserialize, Serialize};

use crate::domain::entities::SessionUser;

/// Password grant request body.
#[derive(Serialize)]
pub struct PasswordGrantRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry as a Unix timestamp.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserResponse,
}

/// User object returned by the provider.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        Self::new(user.id, user.email.unwrap_or_default())
    }
}

/// Error body. Older deployments send `error_description`, newer ones `msg`.
#[derive(Debug, Default, Deserialize)]
pub struct AuthErrorResponse {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorResponse {
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}
