//! Session accessor port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;

/// Yields the current identity session. Implementations must not cache:
/// every API call asks again.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Returns the active session, or `None` when the user must log in.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Session accessor returning a fixed session and counting lookups.
    pub struct MockSessionPort {
        session: Option<Session>,
        lookups: AtomicUsize,
    }

    impl MockSessionPort {
        /// Creates an accessor with no session.
        pub fn signed_out() -> Self {
            Self {
                session: None,
                lookups: AtomicUsize::new(0),
            }
        }

        /// Creates an accessor returning the given session.
        pub fn signed_in(session: Session) -> Self {
            Self {
                session: Some(session),
                lookups: AtomicUsize::new(0),
            }
        }

        /// Number of times the session was requested.
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionPort for MockSessionPort {
        async fn current_session(&self) -> Result<Option<Session>, AuthError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.session.clone())
        }
    }
}
