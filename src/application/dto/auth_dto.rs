//! Authentication DTOs.

use crate::domain::entities::{Session, SessionUser};

/// Where the active session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Access token from `--token` or `GESTAO_ACCESS_TOKEN`.
    CommandLine,
    /// Session stored in the system keyring.
    Keyring,
    /// Email and password typed on the login screen.
    UserInput,
}

impl SessionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CommandLine => "command line / environment",
            Self::Keyring => "system keyring",
            Self::UserInput => "user input",
        }
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login request data.
#[derive(Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Whether to keep the session in the keyring.
    pub persist_session: bool,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("persist_session", &self.persist_session)
            .finish()
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub session: Session,
    /// Whether the session made it into secure storage.
    pub session_persisted: bool,
}

impl LoginResponse {
    #[must_use]
    pub const fn new(session: Session, session_persisted: bool) -> Self {
        Self {
            session,
            session_persisted,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.session.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_not_in_debug_output() {
        let request = LoginRequest::new("ana@example.com", "s3cret!");
        let debug_output = format!("{request:?}");
        assert!(!debug_output.contains("s3cret!"));
        assert!(debug_output.contains("ana@example.com"));
    }
}
