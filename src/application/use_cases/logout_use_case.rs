//! Logout use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Forgets the stored session.
#[derive(Clone)]
pub struct LogoutUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LogoutUseCase {
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Deletes the stored session.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn execute(&self) -> Result<(), AuthError> {
        debug!("Deleting session from secure storage");
        match self.storage_port.delete_session().await {
            Ok(()) => {
                info!("Session deleted from secure storage");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete session from secure storage");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccessToken, Session, SessionUser};
    use crate::domain::ports::mocks::MockSessionStorage;

    #[tokio::test]
    async fn test_logout_clears_storage() {
        let storage = Arc::new(MockSessionStorage::with_session(Session::new(
            AccessToken::new_unchecked("abc"),
            SessionUser::default(),
        )));
        LogoutUseCase::new(storage.clone()).execute().await.unwrap();
        assert!(!storage.has_session().await.unwrap());
    }
}
