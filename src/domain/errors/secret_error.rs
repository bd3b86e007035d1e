//! Keyring access error types.

use thiserror::Error;

/// Failures of the OS secret store holding the session.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to open keyring entry: {0}")]
    AccessFailed(String),

    #[error("stored session is unreadable: {0}")]
    Corrupted(String),

    #[error("keyring backend not available: {0}")]
    NotAvailable(String),
}
