//! Gestão REST API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::{
    AccessToken, Aluno, Aula, Celula, Culto, Encontro, Membro, RecordId, Rede, SavedRecord,
    Supervisor, Turma,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::GestaoApiPort;

const USER_AGENT: &str = concat!("gestao/", env!("CARGO_PKG_VERSION"));

/// reqwest adapter for [`GestaoApiPort`]. One request per call, no retries.
pub struct GestaoHttpClient {
    client: Client,
    base_url: String,
}

impl GestaoHttpClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        debug!(%method, path, "Calling gestão API");
        self.client
            .request(method, self.url(path))
            .header(header::AUTHORIZATION, token.bearer())
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach gestão API");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to the API")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = error_from_response(status, &body);
        warn!(status = status.as_u16(), error = %error, "gestão API returned an error");
        Err(error)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &AccessToken) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path, token)).await?;
        decode(response).await
    }

    async fn write<B>(
        &self,
        method: Method,
        path: &str,
        token: &AccessToken,
        body: &B,
    ) -> Result<SavedRecord, ApiError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .send(self.request(method, path, token).json(body))
            .await?;
        match response.bytes().await {
            Ok(bytes) => Ok(saved_record(&bytes)),
            Err(e) => {
                warn!(error = %e, path, "Write accepted but its response body was lost");
                Ok(SavedRecord::unknown())
            }
        }
    }
}

/// Reads the assigned id out of an accepted write. Empty or unexpected bodies give an
/// unknown id, never an error: the record is already stored.
fn saved_record(body: &[u8]) -> SavedRecord {
    if body.iter().all(u8::is_ascii_whitespace) {
        return SavedRecord::unknown();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "Write response carried no record id");
        SavedRecord::unknown()
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "Failed to decode API response");
        ApiError::decode(e.to_string())
    })
}

/// Maps a non-2xx response to an [`ApiError`]. A 401 means the session is no longer valid.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::LoginRequired;
    }
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_default();
    ApiError::http(status.as_u16(), message)
}

#[async_trait]
impl GestaoApiPort for GestaoHttpClient {
    async fn list_celulas(&self, token: &AccessToken) -> Result<Vec<Celula>, ApiError> {
        self.get("/celulas", token).await
    }

    async fn get_celula(&self, token: &AccessToken, id: RecordId) -> Result<Celula, ApiError> {
        self.get(&format!("/celulas/{id}"), token).await
    }

    async fn create_celula(
        &self,
        token: &AccessToken,
        celula: &Celula,
    ) -> Result<SavedRecord, ApiError> {
        self.write(Method::POST, "/celulas", token, celula).await
    }

    async fn update_celula(
        &self,
        token: &AccessToken,
        celula: &Celula,
    ) -> Result<SavedRecord, ApiError> {
        self.write(Method::PUT, &format!("/celulas/{}", celula.id), token, celula)
            .await
    }

    async fn delete_celula(&self, token: &AccessToken, id: RecordId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/celulas/{id}"), token))
            .await?;
        Ok(())
    }

    async fn list_membros(
        &self,
        token: &AccessToken,
        celula: RecordId,
    ) -> Result<Vec<Membro>, ApiError> {
        self.get(&format!("/celulas/{celula}/membros"), token).await
    }

    async fn create_membro(
        &self,
        token: &AccessToken,
        celula: RecordId,
        membro: &Membro,
    ) -> Result<SavedRecord, ApiError> {
        self.write(
            Method::POST,
            &format!("/celulas/{celula}/membros"),
            token,
            membro,
        )
        .await
    }

    async fn list_encontros(
        &self,
        token: &AccessToken,
        celula: RecordId,
    ) -> Result<Vec<Encontro>, ApiError> {
        self.get(&format!("/celulas/{celula}/encontros"), token).await
    }

    async fn create_encontro(
        &self,
        token: &AccessToken,
        celula: RecordId,
        encontro: &Encontro,
    ) -> Result<SavedRecord, ApiError> {
        self.write(
            Method::POST,
            &format!("/celulas/{celula}/encontros"),
            token,
            encontro,
        )
        .await
    }

    async fn list_redes(&self, token: &AccessToken) -> Result<Vec<Rede>, ApiError> {
        self.get("/redes", token).await
    }

    async fn create_rede(
        &self,
        token: &AccessToken,
        rede: &Rede,
    ) -> Result<SavedRecord, ApiError> {
        self.write(Method::POST, "/redes", token, rede).await
    }

    async fn list_supervisores(&self, token: &AccessToken) -> Result<Vec<Supervisor>, ApiError> {
        self.get("/supervisores", token).await
    }

    async fn get_supervisor(
        &self,
        token: &AccessToken,
        id: RecordId,
    ) -> Result<Supervisor, ApiError> {
        self.get(&format!("/supervisores/{id}"), token).await
    }

    async fn list_cultos(&self, token: &AccessToken) -> Result<Vec<Culto>, ApiError> {
        self.get("/cultos", token).await
    }

    async fn get_culto(&self, token: &AccessToken, id: RecordId) -> Result<Culto, ApiError> {
        self.get(&format!("/cultos/{id}"), token).await
    }

    async fn create_culto(
        &self,
        token: &AccessToken,
        culto: &Culto,
    ) -> Result<SavedRecord, ApiError> {
        self.write(Method::POST, "/cultos", token, culto).await
    }

    async fn update_culto(
        &self,
        token: &AccessToken,
        culto: &Culto,
    ) -> Result<SavedRecord, ApiError> {
        self.write(Method::PUT, &format!("/cultos/{}", culto.id), token, culto)
            .await
    }

    async fn list_turmas(&self, token: &AccessToken) -> Result<Vec<Turma>, ApiError> {
        self.get("/turmas", token).await
    }

    async fn get_turma(&self, token: &AccessToken, id: RecordId) -> Result<Turma, ApiError> {
        self.get(&format!("/turmas/{id}"), token).await
    }

    async fn list_alunos(
        &self,
        token: &AccessToken,
        turma: RecordId,
    ) -> Result<Vec<Aluno>, ApiError> {
        self.get(&format!("/turmas/{turma}/alunos"), token).await
    }

    async fn list_aulas(
        &self,
        token: &AccessToken,
        turma: RecordId,
    ) -> Result<Vec<Aula>, ApiError> {
        self.get(&format!("/turmas/{turma}/aulas"), token).await
    }
}
