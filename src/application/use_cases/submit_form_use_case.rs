//! Form submission: validate, send, and decide what happens next.

use tracing::{info, warn};

use crate::application::forms::{FormKind, FormRecord, FormState};
use crate::application::services::GestaoClient;
use crate::domain::entities::RecordId;
use crate::domain::errors::ApiError;
use crate::domain::validation::FieldErrors;
use crate::domain::{Notification, Route};

/// Result of one submit attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The record was accepted by the API.
    Saved {
        notification: Notification,
        navigate_to: Route,
    },
    /// The API call failed; the form keeps its input for a retry.
    Failed { notification: Notification },
    /// No session; the caller switches to the login screen.
    LoginRequired,
}

/// Submits entity forms through the session-gated client.
#[derive(Clone)]
pub struct SubmitFormUseCase {
    client: GestaoClient,
}

impl SubmitFormUseCase {
    #[must_use]
    pub const fn new(client: GestaoClient) -> Self {
        Self { client }
    }

    pub async fn execute(&self, form: &mut FormState) -> SubmitOutcome {
        let record = match form.validate() {
            Ok(record) => record,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        let editing = form.is_edit_mode();

        match self.send(form.kind(), &record, editing).await {
            Ok(navigate_to) => {
                info!(route = %navigate_to, editing, "Form submitted");
                SubmitOutcome::Saved {
                    notification: success_notification(&record, editing),
                    navigate_to,
                }
            }
            Err(ApiError::LoginRequired) => SubmitOutcome::LoginRequired,
            Err(e) => {
                warn!(error = %e, editing, "Form submission failed");
                SubmitOutcome::Failed {
                    notification: failure_notification(&record, editing, &e),
                }
            }
        }
    }

    async fn send(
        &self,
        kind: FormKind,
        record: &FormRecord,
        editing: bool,
    ) -> Result<Route, ApiError> {
        match (kind, record) {
            (_, FormRecord::Celula(celula)) => {
                let saved = if editing {
                    self.client.update_celula(celula).await?
                } else {
                    self.client.create_celula(celula).await?
                };
                Ok(Route::Celula(returned_id(saved.id, celula.id)))
            }
            (_, FormRecord::Culto(culto)) => {
                let saved = if editing {
                    self.client.update_culto(culto).await?
                } else {
                    self.client.create_culto(culto).await?
                };
                Ok(Route::Culto(returned_id(saved.id, culto.id)))
            }
            (_, FormRecord::Encontro(encontro)) => {
                self.client
                    .create_encontro(encontro.id_celula, encontro)
                    .await?;
                Ok(Route::Celula(encontro.id_celula))
            }
            (FormKind::Membro { celula }, FormRecord::Membro(membro)) => {
                self.client.create_membro(celula, membro).await?;
                Ok(Route::Celula(celula))
            }
            (_, FormRecord::Membro(_)) => Err(ApiError::unexpected("membro form without célula")),
            (_, FormRecord::Rede(rede)) => {
                self.client.create_rede(rede).await?;
                Ok(Route::Redes)
            }
        }
    }
}

/// Prefers the id the server answered with; updates may echo an empty body.
fn returned_id(returned: RecordId, submitted: RecordId) -> RecordId {
    if returned.is_saved() { returned } else { submitted }
}

fn success_notification(record: &FormRecord, editing: bool) -> Notification {
    let done = if editing { "atualizado" } else { "registrado" };
    match record {
        FormRecord::Celula(celula) => Notification::success(
            if editing {
                "Grupo atualizado com sucesso!"
            } else {
                "Grupo salvo com sucesso!"
            },
            format!("Grupo \"{}\" {done} com sucesso", celula.nome),
        ),
        FormRecord::Culto(culto) => Notification::success(
            registro_title(editing),
            format!(
                "Culto \"{}\" {done} para {}",
                culto.nome,
                culto.data.format("%d/%m/%Y")
            ),
        ),
        FormRecord::Encontro(encontro) => Notification::success(
            registro_title(editing),
            format!(
                "Serviço de {} {done} com sucesso",
                encontro.data.format("%d/%m/%Y")
            ),
        ),
        FormRecord::Membro(membro) => Notification::success(
            if editing {
                "Membro atualizado com sucesso!"
            } else {
                "Membro salvo com sucesso!"
            },
            format!("Membro \"{}\" {done} com sucesso", membro.nome),
        ),
        FormRecord::Rede(rede) => Notification::success(
            if editing {
                "Rede atualizada com sucesso!"
            } else {
                "Rede salva com sucesso!"
            },
            format!(
                "Rede \"{}\" {} com sucesso",
                rede.nome,
                if editing { "atualizada" } else { "registrada" }
            ),
        ),
    }
}

const fn registro_title(editing: bool) -> &'static str {
    if editing {
        "Registro atualizado com sucesso!"
    } else {
        "Registro salvo com sucesso!"
    }
}

fn failure_notification(record: &FormRecord, editing: bool, error: &ApiError) -> Notification {
    let (title, verb) = if editing {
        ("Erro ao atualizar", "atualizar")
    } else {
        ("Erro ao salvar", "salvar")
    };
    let what = match record {
        FormRecord::Celula(_) => "o grupo",
        _ => "o registro",
    };
    let mut message = format!("Ocorreu um erro ao {verb} {what}. Tente novamente.");
    if let ApiError::Http { message: detail, .. } = error {
        if !detail.is_empty() {
            message.push_str(&format!(" ({detail})"));
        }
    }
    Notification::error(title, message)
}
