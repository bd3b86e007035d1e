//! Identity provider HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{AuthErrorResponse, PasswordGrantRequest, TokenResponse, UserResponse};
use crate::domain::entities::{AccessToken, Session, SessionUser};
use crate::domain::errors::AuthError;
use crate::domain::ports::IdentityPort;

const USER_AGENT: &str = concat!("gestao/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "apikey";

/// Password-grant client for a Supabase-style auth service.
pub struct IdentityClient {
    client: Client,
    base_url: Option<String>,
    public_key: Option<String>,
}

impl IdentityClient {
    /// Creates a client. Missing URL or key only fail once a call is made.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: Option<String>,
        public_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            public_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<(String, &str), AuthError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AuthError::not_configured("GESTAO_AUTH_URL"))?;
        let key = self
            .public_key
            .as_deref()
            .ok_or_else(|| AuthError::not_configured("GESTAO_AUTH_PUBLIC_KEY"))?;
        Ok((format!("{base_url}/auth/v1{path}"), key))
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> AuthError {
        let error_message = response
            .json::<AuthErrorResponse>()
            .await
            .ok()
            .and_then(AuthErrorResponse::into_message)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::BAD_REQUEST => AuthError::invalid_credentials(error_message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::rejected(error_message),
            StatusCode::TOO_MANY_REQUESTS => AuthError::RateLimited {
                retry_after_ms: 5000,
            },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                AuthError::network("identity provider is temporarily unavailable")
            }
            _ => AuthError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }
}

fn map_send_error(e: &reqwest::Error) -> AuthError {
    warn!(error = %e, "Failed to reach identity provider");
    if e.is_timeout() {
        AuthError::network("request timed out")
    } else if e.is_connect() {
        AuthError::network("failed to connect to identity provider")
    } else {
        AuthError::network(e.to_string())
    }
}

/// Converts a token response into a session, preferring the absolute expiry.
fn session_from_response(response: TokenResponse, now: DateTime<Utc>) -> Result<Session, AuthError> {
    let token = AccessToken::new(response.access_token)
        .ok_or_else(|| AuthError::unexpected("identity provider returned a blank token"))?;

    let expires_at = response
        .expires_at
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .or_else(|| {
            response
                .expires_in
                .and_then(TimeDelta::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
        });

    let mut session = Session::new(token, response.user.into());
    session.refresh_token = response.refresh_token;
    session.expires_at = expires_at;
    Ok(session)
}

#[async_trait]
impl IdentityPort for IdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let (url, key) = self.endpoint("/token")?;
        debug!(email, "Requesting password grant");

        let response = self
            .client
            .post(&url)
            .query(&[("grant_type", "password")])
            .header(API_KEY_HEADER, key)
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse token response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;

        let session = session_from_response(body, Utc::now())?;
        debug!(user_id = %session.user.id, "Password grant accepted");
        Ok(session)
    }

    async fn fetch_user(&self, token: &AccessToken) -> Result<SessionUser, AuthError> {
        let (url, key) = self.endpoint("/user")?;
        debug!("Validating access token with identity provider");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, key)
            .header(header::AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse user response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = IdentityClient::new(
            Some("https://auth.example.org/".to_string()),
            Some("anon".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let (url, key) = client.endpoint("/token").unwrap();
        assert_eq!(url, "https://auth.example.org/auth/v1/token");
        assert_eq!(key, "anon");
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_before_network() {
        let client = IdentityClient::new(None, None, Duration::from_secs(5)).unwrap();
        let result = client.sign_in("ana@example.com", "senha").await;
        assert!(matches!(result, Err(AuthError::NotConfigured { .. })));
    }

    #[test]
    fn test_session_expiry_from_lifetime() {
        let now = Utc::now();
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a.b.c", "refresh_token": "r", "expires_in": 3600,
                "user": {"id": "u1", "email": "ana@example.com"}}"#,
        )
        .unwrap();

        let session = session_from_response(response, now).unwrap();
        assert_eq!(session.expires_at, Some(now + TimeDelta::seconds(3600)));
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert_eq!(session.user.email, "ana@example.com");
    }

    #[test]
    fn test_out_of_range_expiry_is_dropped() {
        for body in [
            r#"{"access_token": "a.b.c", "expires_in": 9223372036854775807, "user": {"id": "u1"}}"#,
            r#"{"access_token": "a.b.c", "expires_in": -9223372036854775808, "user": {"id": "u1"}}"#,
            r#"{"access_token": "a.b.c", "expires_at": 9223372036854775807, "user": {"id": "u1"}}"#,
        ] {
            let response: TokenResponse = serde_json::from_str(body).unwrap();
            let session = session_from_response(response, Utc::now()).unwrap();
            assert_eq!(session.expires_at, None);
            assert_eq!(session.access_token.as_str(), "a.b.c");
        }
    }

    #[test]
    fn test_blank_token_rejected() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token": " ", "user": {"id": "u1"}}"#).unwrap();
        assert!(session_from_response(response, Utc::now()).is_err());
    }
}
