//! Session-gated access to the gestão API.
//!
//! Every method asks the [`SessionPort`] for the current session first. Without an
//! access token it fails with [`ApiError::LoginRequired`] and the HTTP port is never
//! touched; otherwise it makes exactly one call through the [`GestaoApiPort`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{
    AccessToken, Aluno, Aula, Celula, Culto, Encontro, Membro, RecordId, Rede, SavedRecord,
    Supervisor, Turma,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{GestaoApiPort, SessionPort};

#[derive(Clone)]
pub struct GestaoClient {
    session: Arc<dyn SessionPort>,
    api: Arc<dyn GestaoApiPort>,
}

impl GestaoClient {
    #[must_use]
    pub fn new(session: Arc<dyn SessionPort>, api: Arc<dyn GestaoApiPort>) -> Self {
        Self { session, api }
    }

    async fn token(&self, operation: &'static str) -> Result<AccessToken, ApiError> {
        match self.session.current_session().await {
            Ok(Some(session)) => {
                debug!(operation, "Session found, calling API");
                Ok(session.access_token)
            }
            Ok(None) => {
                debug!(operation, "No session, login required");
                Err(ApiError::LoginRequired)
            }
            Err(e) => {
                warn!(operation, error = %e, "Session lookup failed, login required");
                Err(ApiError::LoginRequired)
            }
        }
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_celulas(&self) -> Result<Vec<Celula>, ApiError> {
        let token = self.token("list_celulas").await?;
        self.api.list_celulas(&token).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn get_celula(&self, id: RecordId) -> Result<Celula, ApiError> {
        let token = self.token("get_celula").await?;
        self.api.get_celula(&token, id).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn create_celula(&self, celula: &Celula) -> Result<SavedRecord, ApiError> {
        let token = self.token("create_celula").await?;
        self.api.create_celula(&token, celula).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn update_celula(&self, celula: &Celula) -> Result<SavedRecord, ApiError> {
        let token = self.token("update_celula").await?;
        self.api.update_celula(&token, celula).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn delete_celula(&self, id: RecordId) -> Result<(), ApiError> {
        let token = self.token("delete_celula").await?;
        self.api.delete_celula(&token, id).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_membros(&self, celula: RecordId) -> Result<Vec<Membro>, ApiError> {
        let token = self.token("list_membros").await?;
        self.api.list_membros(&token, celula).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn create_membro(
        &self,
        celula: RecordId,
        membro: &Membro,
    ) -> Result<SavedRecord, ApiError> {
        let token = self.token("create_membro").await?;
        self.api.create_membro(&token, celula, membro).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_encontros(&self, celula: RecordId) -> Result<Vec<Encontro>, ApiError> {
        let token = self.token("list_encontros").await?;
        self.api.list_encontros(&token, celula).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn create_encontro(
        &self,
        celula: RecordId,
        encontro: &Encontro,
    ) -> Result<SavedRecord, ApiError> {
        let token = self.token("create_encontro").await?;
        self.api.create_encontro(&token, celula, encontro).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_redes(&self) -> Result<Vec<Rede>, ApiError> {
        let token = self.token("list_redes").await?;
        self.api.list_redes(&token).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn create_rede(&self, rede: &Rede) -> Result<SavedRecord, ApiError> {
        let token = self.token("create_rede").await?;
        self.api.create_rede(&token, rede).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_supervisores(&self) -> Result<Vec<Supervisor>, ApiError> {
        let token = self.token("list_supervisores").await?;
        self.api.list_supervisores(&token).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn get_supervisor(&self, id: RecordId) -> Result<Supervisor, ApiError> {
        let token = self.token("get_supervisor").await?;
        self.api.get_supervisor(&token, id).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_cultos(&self) -> Result<Vec<Culto>, ApiError> {
        let token = self.token("list_cultos").await?;
        self.api.list_cultos(&token).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn get_culto(&self, id: RecordId) -> Result<Culto, ApiError> {
        let token = self.token("get_culto").await?;
        self.api.get_culto(&token, id).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn create_culto(&self, culto: &Culto) -> Result<SavedRecord, ApiError> {
        let token = self.token("create_culto").await?;
        self.api.create_culto(&token, culto).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn update_culto(&self, culto: &Culto) -> Result<SavedRecord, ApiError> {
        let token = self.token("update_culto").await?;
        self.api.update_culto(&token, culto).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_turmas(&self) -> Result<Vec<Turma>, ApiError> {
        let token = self.token("list_turmas").await?;
        self.api.list_turmas(&token).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn get_turma(&self, id: RecordId) -> Result<Turma, ApiError> {
        let token = self.token("get_turma").await?;
        self.api.get_turma(&token, id).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_alunos(&self, turma: RecordId) -> Result<Vec<Aluno>, ApiError> {
        let token = self.token("list_alunos").await?;
        self.api.list_alunos(&token, turma).await
    }

    /// # Errors
    /// Returns [`ApiError::LoginRequired`] without a session, or the API failure.
    pub async fn list_aulas(&self, turma: RecordId) -> Result<Vec<Aula>, ApiError> {
        let token = self.token("list_aulas").await?;
        self.api.list_aulas(&token, turma).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Session, SessionUser};
    use crate::domain::ports::mocks::{MockGestaoApiPort, MockSessionPort};

    fn signed_in() -> Arc<MockSessionPort> {
        Arc::new(MockSessionPort::signed_in(Session::new(
            AccessToken::new_unchecked("token-abc"),
            SessionUser::new("u1", "lider@example.com"),
        )))
    }

    #[tokio::test]
    async fn test_no_session_never_reaches_http() {
        let mut api = MockGestaoApiPort::new();
        api.expect_list_celulas().never();
        api.expect_create_celula().never();
        api.expect_delete_celula().never();

        let session = Arc::new(MockSessionPort::signed_out());
        let client = GestaoClient::new(session.clone(), Arc::new(api));

        assert_eq!(client.list_celulas().await, Err(ApiError::LoginRequired));
        assert_eq!(
            client.create_celula(&Celula::new("Hope 3", "Ana")).await,
            Err(ApiError::LoginRequired)
        );
        assert_eq!(
            client.delete_celula(RecordId(7)).await,
            Err(ApiError::LoginRequired)
        );
        assert_eq!(session.lookups(), 3);
    }

    #[tokio::test]
    async fn test_token_is_forwarded() {
        let mut api = MockGestaoApiPort::new();
        api.expect_get_celula()
            .withf(|token, id| token.as_str() == "token-abc" && *id == RecordId(7))
            .times(1)
            .returning(|_, id| {
                let mut celula = Celula::new("Hope 3", "Ana");
                celula.id = id;
                Ok(celula)
            });

        let client = GestaoClient::new(signed_in(), Arc::new(api));
        let celula = client.get_celula(RecordId(7)).await.unwrap();

        assert_eq!(celula.id, RecordId(7));
        assert_eq!(celula.nome, "Hope 3");
    }

    #[tokio::test]
    async fn test_session_is_read_on_every_call() {
        let mut api = MockGestaoApiPort::new();
        api.expect_list_redes().times(2).returning(|_| Ok(Vec::new()));

        let session = signed_in();
        let client = GestaoClient::new(session.clone(), Arc::new(api));
        client.list_redes().await.unwrap();
        client.list_redes().await.unwrap();

        assert_eq!(session.lookups(), 2);
    }

    #[tokio::test]
    async fn test_child_list_failure_propagates() {
        let mut api = MockGestaoApiPort::new();
        api.expect_list_membros()
            .times(1)
            .returning(|_, _| Err(ApiError::http(500, "")));

        let client = GestaoClient::new(signed_in(), Arc::new(api));
        let result = client.list_membros(RecordId(3)).await;

        assert_eq!(result.unwrap_err().status(), Some(500));
    }
}
