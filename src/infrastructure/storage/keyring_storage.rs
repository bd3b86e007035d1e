//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::Session;
use crate::domain::errors::{AuthError, SecretError};
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "gestao";
const KEYRING_USER: &str = "session";

/// System keyring session storage adapter. The session is kept as one JSON secret.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, AuthError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| SecretError::AccessFailed(format!("failed to access keyring: {e}")).into())
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        debug!(service = %self.service, "Retrieving session from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(secret) => match serde_json::from_str::<Session>(&secret) {
                Ok(session) => {
                    debug!("Session found in keyring");
                    Ok(Some(session))
                }
                Err(e) => {
                    warn!(error = %e, "Stored session is unreadable, ignoring it");
                    Err(SecretError::Corrupted(e.to_string()).into())
                }
            },
            Err(keyring::Error::NoEntry) => {
                debug!("No session stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve session from keyring");
                Err(AuthError::retrieval_failed(e.to_string()))
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        debug!(service = %self.service, "Storing session in keyring");

        let secret = serde_json::to_string(session)
            .map_err(|e| AuthError::storage_failed(format!("failed to encode session: {e}")))?;
        let entry = self.entry()?;

        entry.set_password(&secret).map_err(|e| {
            warn!(error = %e, "Failed to store session in keyring");
            AuthError::storage_failed(e.to_string())
        })?;

        debug!("Session stored successfully");
        Ok(())
    }

    async fn delete_session(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Deleting session from keyring");

        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) => {
                debug!("Session deleted from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No session to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete session from keyring");
                Err(AuthError::storage_failed(e.to_string()))
            }
        }
    }
}
