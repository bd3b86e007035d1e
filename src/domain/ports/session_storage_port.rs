//! Session persistence port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;

/// Port for session persistence operations.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves the stored session.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Stores the session securely.
    async fn store_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Deletes the stored session.
    async fn delete_session(&self) -> Result<(), AuthError>;

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, AuthError> {
        Ok(self.get_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory session storage for tests.
    pub struct MockSessionStorage {
        session: Arc<RwLock<Option<Session>>>,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                session: Arc::new(RwLock::new(None)),
            }
        }

        /// Creates mock storage holding a session.
        pub fn with_session(session: Session) -> Self {
            Self {
                session: Arc::new(RwLock::new(Some(session))),
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.session.read().await.clone())
        }

        async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
            *self.session.write().await = Some(session.clone());
            Ok(())
        }

        async fn delete_session(&self) -> Result<(), AuthError> {
            *self.session.write().await = None;
            Ok(())
        }
    }
}
