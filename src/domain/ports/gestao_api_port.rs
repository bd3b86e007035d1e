//! Gestão REST API port.
//!
//! One method per remote operation. Every method takes the bearer token explicitly;
//! deciding where the token comes from is the session gate's job. Writes only report
//! the id the server assigned, if any.

use async_trait::async_trait;

use crate::domain::entities::{
    AccessToken, Aluno, Aula, Celula, Culto, Encontro, Membro, RecordId, Rede, SavedRecord,
    Supervisor, Turma,
};
use crate::domain::errors::ApiError;

/// Port for the gestão REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GestaoApiPort: Send + Sync {
    /// `GET /celulas`
    async fn list_celulas(&self, token: &AccessToken) -> Result<Vec<Celula>, ApiError>;

    /// `GET /celulas/{id}`
    async fn get_celula(&self, token: &AccessToken, id: RecordId) -> Result<Celula, ApiError>;

    /// `POST /celulas`
    async fn create_celula(
        &self,
        token: &AccessToken,
        celula: &Celula,
    ) -> Result<SavedRecord, ApiError>;

    /// `PUT /celulas/{id}`
    async fn update_celula(
        &self,
        token: &AccessToken,
        celula: &Celula,
    ) -> Result<SavedRecord, ApiError>;

    /// `DELETE /celulas/{id}`
    async fn delete_celula(&self, token: &AccessToken, id: RecordId) -> Result<(), ApiError>;

    /// `GET /celulas/{id}/membros`
    async fn list_membros(
        &self,
        token: &AccessToken,
        celula: RecordId,
    ) -> Result<Vec<Membro>, ApiError>;

    /// `POST /celulas/{id}/membros`
    async fn create_membro(
        &self,
        token: &AccessToken,
        celula: RecordId,
        membro: &Membro,
    ) -> Result<SavedRecord, ApiError>;

    /// `GET /celulas/{id}/encontros`
    async fn list_encontros(
        &self,
        token: &AccessToken,
        celula: RecordId,
    ) -> Result<Vec<Encontro>, ApiError>;

    /// `POST /celulas/{id}/encontros`
    async fn create_encontro(
        &self,
        token: &AccessToken,
        celula: RecordId,
        encontro: &Encontro,
    ) -> Result<SavedRecord, ApiError>;

    /// `GET /redes`
    async fn list_redes(&self, token: &AccessToken) -> Result<Vec<Rede>, ApiError>;

    /// `POST /redes`
    async fn create_rede(&self, token: &AccessToken, rede: &Rede)
    -> Result<SavedRecord, ApiError>;

    /// `GET /supervisores`
    async fn list_supervisores(&self, token: &AccessToken) -> Result<Vec<Supervisor>, ApiError>;

    /// `GET /supervisores/{id}`
    async fn get_supervisor(
        &self,
        token: &AccessToken,
        id: RecordId,
    ) -> Result<Supervisor, ApiError>;

    /// `GET /cultos`
    async fn list_cultos(&self, token: &AccessToken) -> Result<Vec<Culto>, ApiError>;

    /// `GET /cultos/{id}`
    async fn get_culto(&self, token: &AccessToken, id: RecordId) -> Result<Culto, ApiError>;

    /// `POST /cultos`
    async fn create_culto(
        &self,
        token: &AccessToken,
        culto: &Culto,
    ) -> Result<SavedRecord, ApiError>;

    /// `PUT /cultos/{id}`
    async fn update_culto(
        &self,
        token: &AccessToken,
        culto: &Culto,
    ) -> Result<SavedRecord, ApiError>;

    /// `GET /turmas`
    async fn list_turmas(&self, token: &AccessToken) -> Result<Vec<Turma>, ApiError>;

    /// `GET /turmas/{id}`
    async fn get_turma(&self, token: &AccessToken, id: RecordId) -> Result<Turma, ApiError>;

    /// `GET /turmas/{id}/alunos`
    async fn list_alunos(
        &self,
        token: &AccessToken,
        turma: RecordId,
    ) -> Result<Vec<Aluno>, ApiError>;

    /// `GET /turmas/{id}/aulas`
    async fn list_aulas(&self, token: &AccessToken, turma: RecordId)
    -> Result<Vec<Aula>, ApiError>;
}
