//! In-memory session storage for builds without keyring support.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Session storage that lives as long as the process.
/// Used when the keyring feature is disabled.
#[derive(Default)]
pub struct MemorySessionStorage {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStoragePort for MemorySessionStorage {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.read().await.clone())
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        debug!("Keyring feature disabled - session kept in memory only");
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn delete_session(&self) -> Result<(), AuthError> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccessToken, SessionUser};

    #[tokio::test]
    async fn test_memory_round_trip() {
        let storage = MemorySessionStorage::new();
        assert!(!storage.has_session().await.unwrap());

        let session = Session::new(AccessToken::new_unchecked("abc"), SessionUser::default());
        storage.store_session(&session).await.unwrap();
        assert_eq!(storage.get_session().await.unwrap(), Some(session));

        storage.delete_session().await.unwrap();
        assert!(storage.get_session().await.unwrap().is_none());
    }

    #[test]
    fn test_starts_empty() {
        let storage = MemorySessionStorage::new();
        assert!(tokio_test::block_on(storage.get_session()).unwrap().is_none());
    }
}
