//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    #[error("session rejected by identity provider: {message}")]
    SessionRejected { message: String },

    #[error("failed to retrieve stored session: {message}")]
    SessionRetrievalFailed { message: String },

    #[error("failed to store session: {message}")]
    SessionStorageFailed { message: String },

    #[error("no session available")]
    NoSessionAvailable,

    #[error("identity provider is not configured: {missing}")]
    NotConfigured { missing: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("rate limited by identity provider, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("secure storage error: {0}")]
    Secret(#[from] super::SecretError),

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates invalid credentials error.
    #[must_use]
    pub fn invalid_credentials(reason: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            reason: reason.into(),
        }
    }

    /// Creates session rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::SessionRejected {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::SessionRetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::SessionStorageFailed {
            message: message.into(),
        }
    }

    /// Creates not configured error.
    #[must_use]
    pub fn not_configured(missing: impl Into<String>) -> Self {
        Self::NotConfigured {
            missing: missing.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::RateLimited { .. }
                | Self::SessionRejected { .. }
                | Self::InvalidCredentials { .. }
                | Self::NoSessionAvailable
        )
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(AuthError::invalid_credentials("wrong password").is_recoverable());
        assert!(AuthError::network("timeout").is_recoverable());
        assert!(!AuthError::not_configured("auth_url").is_recoverable());
    }

    #[test]
    fn test_secret_error_conversion() {
        let error: AuthError = super::super::SecretError::NotAvailable("no backend".into()).into();
        assert!(matches!(error, AuthError::Secret(_)));
        assert!(!error.is_network_error());
    }
}
