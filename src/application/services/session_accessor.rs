//! Session accessor backed by secure storage plus an in-memory slot.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{SessionPort, SessionStoragePort};

/// Answers "who is signed in" on every call.
///
/// A session handed to [`SessionAccessor::remember`] wins over the stored one. This covers
/// logins that were not persisted and tokens supplied on the command line.
pub struct SessionAccessor {
    storage: Arc<dyn SessionStoragePort>,
    volatile: RwLock<Option<Session>>,
}

impl SessionAccessor {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            storage,
            volatile: RwLock::new(None),
        }
    }

    /// Keeps the session in memory for the rest of the process.
    pub async fn remember(&self, session: Session) {
        debug!(user = %session.user.display_name(), "Session held in memory");
        *self.volatile.write().await = Some(session);
    }

    /// Drops the in-memory session. Stored sessions are untouched.
    pub async fn forget(&self) {
        *self.volatile.write().await = None;
    }
}

#[async_trait]
impl SessionPort for SessionAccessor {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let remembered = self.volatile.read().await.clone();
        let session = match remembered {
            Some(session) => Some(session),
            None => self.storage.get_session().await?,
        };

        Ok(session.filter(|session| {
            let expired = session.is_expired_at(Utc::now());
            if expired {
                debug!("Session is past its expiry");
            }
            !expired
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccessToken, SessionUser};
    use crate::domain::ports::mocks::MockSessionStorage;
    use chrono::Duration;

    fn session(token: &str) -> Session {
        Session::new(
            AccessToken::new_unchecked(token),
            SessionUser::new("u1", "lider@example.com"),
        )
    }

    #[tokio::test]
    async fn test_reads_stored_session_each_time() {
        let storage = Arc::new(MockSessionStorage::new());
        let accessor = SessionAccessor::new(storage.clone());

        assert!(accessor.current_session().await.unwrap().is_none());

        storage.store_session(&session("stored")).await.unwrap();
        let current = accessor.current_session().await.unwrap().unwrap();
        assert_eq!(current.access_token.as_str(), "stored");

        storage.delete_session().await.unwrap();
        assert!(accessor.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remembered_session_wins() {
        let storage = Arc::new(MockSessionStorage::with_session(session("stored")));
        let accessor = SessionAccessor::new(storage);

        accessor.remember(session("volatile")).await;
        let current = accessor.current_session().await.unwrap().unwrap();
        assert_eq!(current.access_token.as_str(), "volatile");

        accessor.forget().await;
        let current = accessor.current_session().await.unwrap().unwrap();
        assert_eq!(current.access_token.as_str(), "stored");
    }

    #[tokio::test]
    async fn test_expired_session_is_ignored() {
        let expired = session("old").with_expiry(Utc::now() - Duration::minutes(5));
        let accessor = SessionAccessor::new(Arc::new(MockSessionStorage::with_session(expired)));

        assert!(accessor.current_session().await.unwrap().is_none());
    }
}
