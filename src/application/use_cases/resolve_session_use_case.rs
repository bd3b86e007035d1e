//! Startup session resolution.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::dto::SessionSource;
use crate::domain::entities::{AccessToken, Session};
use crate::domain::errors::AuthError;
use crate::domain::ports::{IdentityPort, SessionStoragePort};

/// Session found at startup, with its source.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session: Session,
    pub source: SessionSource,
}

impl ResolvedSession {
    #[must_use]
    pub const fn new(session: Session, source: SessionSource) -> Self {
        Self { session, source }
    }
}

/// Decides whether the app starts signed in.
pub struct ResolveSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
    identity_port: Arc<dyn IdentityPort>,
}

impl ResolveSessionUseCase {
    #[must_use]
    pub const fn new(
        storage_port: Arc<dyn SessionStoragePort>,
        identity_port: Arc<dyn IdentityPort>,
    ) -> Self {
        Self {
            storage_port,
            identity_port,
        }
    }

    /// Resolves a session from the keyring or a CLI/env access token.
    ///
    /// Priority:
    /// 1. Keyring, unless expired
    /// 2. CLI/Env token, accepted once the identity provider recognises it
    ///
    /// # Errors
    /// Returns error only when the provider cannot be reached to check the CLI token.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedSession>, AuthError> {
        debug!("Checking keyring for stored session");
        match self.storage_port.get_session().await {
            Ok(Some(session)) if !session.is_expired_at(Utc::now()) => {
                info!("Using session from system keyring");
                return Ok(Some(ResolvedSession::new(session, SessionSource::Keyring)));
            }
            Ok(Some(_)) => debug!("Stored session has expired"),
            Ok(None) => debug!("No session found in keyring"),
            Err(e) => debug!(error = %e, "Failed to check keyring"),
        }

        let Some(token) = cli_token.and_then(AccessToken::new) else {
            debug!("No session found in any source");
            return Ok(None);
        };

        debug!("Validating command-line/env token");
        match self.identity_port.fetch_user(&token).await {
            Ok(user) => {
                info!(email = %user.email, "Using token from command line / environment");
                Ok(Some(ResolvedSession::new(
                    Session::new(token, user),
                    SessionSource::CommandLine,
                )))
            }
            Err(e) if e.is_network_error() => Err(e),
            Err(e) => {
                warn!(error = %e, "Command-line token rejected");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionUser;
    use crate::domain::ports::mocks::{MockIdentityPort, MockSessionStorage};
    use chrono::Duration;

    fn stored_session() -> Session {
        Session::new(
            AccessToken::new_unchecked("stored.jwt.token"),
            SessionUser::new("u1", "lider@example.com"),
        )
    }

    #[tokio::test]
    async fn test_keyring_priority() {
        let storage = Arc::new(MockSessionStorage::with_session(stored_session()));
        let use_case = ResolveSessionUseCase::new(storage, Arc::new(MockIdentityPort::new(true)));

        let resolved = use_case
            .execute(Some("cli.jwt.token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, SessionSource::Keyring);
        assert_eq!(resolved.session.access_token.as_str(), "stored.jwt.token");
    }

    #[tokio::test]
    async fn test_expired_keyring_session_falls_back_to_cli() {
        let expired = stored_session().with_expiry(Utc::now() - Duration::hours(1));
        let storage = Arc::new(MockSessionStorage::with_session(expired));
        let use_case = ResolveSessionUseCase::new(storage, Arc::new(MockIdentityPort::new(true)));

        let resolved = use_case
            .execute(Some("cli.jwt.token".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.source, SessionSource::CommandLine);
    }

    #[tokio::test]
    async fn test_rejected_cli_token_means_login() {
        let storage = Arc::new(MockSessionStorage::new());
        let use_case = ResolveSessionUseCase::new(storage, Arc::new(MockIdentityPort::new(false)));

        let result = use_case
            .execute(Some("cli.jwt.token".to_string()))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_no_session_found() {
        let storage = Arc::new(MockSessionStorage::new());
        let use_case = ResolveSessionUseCase::new(storage, Arc::new(MockIdentityPort::new(true)));

        assert!(use_case.execute(None).await.unwrap().is_none());
        assert!(use_case.execute(Some("  ".to_string())).await.unwrap().is_none());
    }
}
