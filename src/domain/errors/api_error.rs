//! Errors raised by calls to the gestão REST API.

use thiserror::Error;

/// Failure of a single API operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// No usable session; the caller must send the user to the login screen.
    #[error("authentication required")]
    LoginRequired,

    #[error("server responded {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("unexpected API error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates an HTTP status error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error means "go to the login screen" rather than "show a message".
    #[must_use]
    pub const fn is_login_redirect(&self) -> bool {
        matches!(self, Self::LoginRequired)
    }

    /// Returns whether the request never got an HTTP response.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns the HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a toast or an inline error line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::LoginRequired => "Sessão expirada. Faça login novamente.".to_string(),
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            Self::Http { status, .. } => format!("Erro ao enviar a requisição (HTTP {status})"),
            Self::Network { .. } => "Não foi possível conectar ao servidor.".to_string(),
            Self::Decode { .. } | Self::Unexpected { .. } => {
                "Resposta inesperada do servidor.".to_string()
            }
        }
    }
}
