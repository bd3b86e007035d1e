//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::errors::AuthError;
use crate::domain::ports::{IdentityPort, SessionStoragePort};

/// Handles the email and password sign-in workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    identity_port: Arc<dyn IdentityPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        identity_port: Arc<dyn IdentityPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            identity_port,
            storage_port,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the credentials are blank or rejected by the identity provider.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let email = request.email.trim();
        debug!(email = %email, "Attempting login");

        if email.is_empty() || request.password.is_empty() {
            warn!("Login attempted with blank credentials");
            return Err(AuthError::invalid_credentials("Informe email e senha"));
        }

        let session = self
            .identity_port
            .sign_in(email, &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Sign-in failed"))?;

        info!(
            user_id = %session.user.id,
            email = %session.user.email,
            "Successfully authenticated"
        );

        let session_persisted = if request.persist_session {
            match self.storage_port.store_session(&session).await {
                Ok(()) => {
                    info!("Session persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist session to secure storage");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse::new(session, session_persisted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockIdentityPort, MockSessionStorage};

    #[tokio::test]
    async fn test_successful_login() {
        let identity = Arc::new(MockIdentityPort::new(true));
        let storage = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(identity, storage.clone());
        let response = use_case
            .execute(LoginRequest::new(" lider@example.com ", "senha"))
            .await
            .unwrap();

        assert_eq!(response.user().email, "lider@example.com");
        assert!(response.session_persisted);
        assert!(storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_credentials_never_reach_provider() {
        let identity = Arc::new(MockIdentityPort::new(true));
        let storage = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(identity, storage);
        let result = use_case.execute(LoginRequest::new("   ", "senha")).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let identity = Arc::new(MockIdentityPort::new(false));
        let storage = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(identity, storage.clone());
        let result = use_case
            .execute(LoginRequest::new("lider@example.com", "errada"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
        assert!(!storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let identity = Arc::new(MockIdentityPort::new(true));
        let storage = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(identity, storage.clone());
        let response = use_case
            .execute(LoginRequest::new("lider@example.com", "senha").without_persistence())
            .await
            .unwrap();

        assert!(!response.session_persisted);
        assert!(!storage.has_session().await.unwrap());
    }
}
