//! Identity provider port definition.

use async_trait::async_trait;

use crate::domain::entities::{AccessToken, Session, SessionUser};
use crate::domain::errors::AuthError;

/// Port for the external identity provider.
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Exchanges email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Validates a bearer token and returns the user it belongs to.
    async fn fetch_user(&self, token: &AccessToken) -> Result<SessionUser, AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock identity provider for testing.
    pub struct MockIdentityPort {
        should_succeed: Arc<AtomicBool>,
        user: SessionUser,
    }

    impl MockIdentityPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                user: SessionUser::new("user-1", "lider@example.com"),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl IdentityPort for MockIdentityPort {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Session::new(
                    AccessToken::new_unchecked("header.payload.signature"),
                    self.user.clone(),
                ))
            } else {
                Err(AuthError::invalid_credentials("Invalid login credentials"))
            }
        }

        async fn fetch_user(&self, _token: &AccessToken) -> Result<SessionUser, AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(self.user.clone())
            } else {
                Err(AuthError::rejected("mock rejection"))
            }
        }
    }
}
