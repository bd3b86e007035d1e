//! Background worker that performs every network call for the UI.
//!
//! Page loads run inside a [`JoinSet`] owned by the worker. Opening another page aborts
//! whatever the previous one still had in flight, and every result is tagged with the
//! epoch of the page that asked for it so that the app can drop late arrivals.
//! Writes (form submission, delete) and login/logout are not page-scoped: they run to
//! completion even if the user navigates away.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::application::forms::{FormKind, FormState, OptionSource, OptionsState, SelectOption};
use crate::application::services::{GestaoClient, SessionAccessor};
use crate::application::use_cases::{
    LoginUseCase, LogoutUseCase, SubmitFormUseCase, SubmitOutcome,
};
use crate::domain::Route;
use crate::domain::entities::{
    Aluno, Aula, Celula, Culto, Encontro, Membro, RecordId, Rede, Supervisor, Turma,
};
use crate::domain::errors::{ApiError, AuthError};
use crate::presentation::ui::pages::form_kind;

/// Identifies one visit to a page. Incremented on every navigation or reload.
pub type Epoch = u64;

/// Counts shown on the dashboard. Each one is fetched independently.
#[derive(Debug)]
pub struct DashboardCounts {
    pub celulas: Result<usize, ApiError>,
    pub redes: Result<usize, ApiError>,
    pub cultos: Result<usize, ApiError>,
    pub turmas: Result<usize, ApiError>,
}

/// Result of one page-scoped fetch.
#[derive(Debug)]
pub enum PageData {
    Dashboard(DashboardCounts),
    Celulas(Result<Vec<Celula>, ApiError>),
    Celula(Result<Celula, ApiError>),
    Encontros(Result<Vec<Encontro>, ApiError>),
    Membros(Result<Vec<Membro>, ApiError>),
    Redes(Result<Vec<Rede>, ApiError>),
    Supervisores(Result<Vec<Supervisor>, ApiError>),
    Cultos(Result<Vec<Culto>, ApiError>),
    Culto(Result<Culto, ApiError>),
    Turmas(Result<Vec<Turma>, ApiError>),
    Turma(Result<Turma, ApiError>),
    Alunos(Result<Vec<Aluno>, ApiError>),
    Aulas(Result<Vec<Aula>, ApiError>),
    Options {
        source: OptionSource,
        result: Result<Vec<SelectOption>, ApiError>,
    },
}

impl PageData {
    fn login_required(&self) -> bool {
        fn check<T>(result: &Result<T, ApiError>) -> bool {
            matches!(result, Err(ApiError::LoginRequired))
        }

        match self {
            Self::Dashboard(counts) => {
                check(&counts.celulas)
                    || check(&counts.redes)
                    || check(&counts.cultos)
                    || check(&counts.turmas)
            }
            Self::Celulas(r) => check(r),
            Self::Celula(r) => check(r),
            Self::Encontros(r) => check(r),
            Self::Membros(r) => check(r),
            Self::Redes(r) => check(r),
            Self::Supervisores(r) => check(r),
            Self::Cultos(r) => check(r),
            Self::Culto(r) => check(r),
            Self::Turmas(r) => check(r),
            Self::Turma(r) => check(r),
            Self::Alunos(r) => check(r),
            Self::Aulas(r) => check(r),
            Self::Options { result, .. } => check(result),
        }
    }
}

/// Messages from the worker to the app loop.
#[derive(Debug)]
pub enum Action {
    Page {
        epoch: Epoch,
        data: PageData,
    },
    Submitted {
        epoch: Epoch,
        outcome: SubmitOutcome,
        form: Box<FormState>,
    },
    Deleted {
        epoch: Epoch,
        id: RecordId,
        result: Result<(), ApiError>,
    },
    /// Some call found no usable session; the app shows the login screen.
    LoginRequired,
    LoginFinished(Result<LoginResponse, AuthError>),
    LoggedOut,
}

/// Requests from the app loop to the worker.
#[derive(Debug)]
pub enum BackendCommand {
    /// Loads everything `route` needs. Aborts the previous page's fetches.
    Open { epoch: Epoch, route: Route },
    Submit { epoch: Epoch, form: Box<FormState> },
    DeleteCelula { epoch: Epoch, id: RecordId },
    Login(LoginRequest),
    Logout,
}

/// Sends fetch results back to the app, diverting session failures.
#[derive(Clone)]
struct Emitter {
    epoch: Epoch,
    tx: mpsc::UnboundedSender<Action>,
}

impl Emitter {
    fn send(&self, data: PageData) {
        let action = if data.login_required() {
            Action::LoginRequired
        } else {
            Action::Page {
                epoch: self.epoch,
                data,
            }
        };
        let _ = self.tx.send(action);
    }
}

pub struct Backend {
    client: GestaoClient,
    submit: SubmitFormUseCase,
    login: LoginUseCase,
    logout: LogoutUseCase,
    session: Arc<SessionAccessor>,
    command_rx: mpsc::UnboundedReceiver<BackendCommand>,
    action_tx: mpsc::UnboundedSender<Action>,
    tasks: JoinSet<()>,
    epoch: Epoch,
}

impl Backend {
    #[must_use]
    pub fn new(
        client: GestaoClient,
        login: LoginUseCase,
        logout: LogoutUseCase,
        session: Arc<SessionAccessor>,
        command_rx: mpsc::UnboundedReceiver<BackendCommand>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            submit: SubmitFormUseCase::new(client.clone()),
            client,
            login,
            logout,
            session,
            command_rx,
            action_tx,
            tasks: JoinSet::new(),
            epoch: 0,
        }
    }

    pub async fn run(mut self) {
        info!("Backend worker started");
        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    let Some(command) = command else { break };
                    self.handle_command(command);
                }
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Err(e) = joined {
                        if !e.is_cancelled() {
                            warn!(error = %e, "Page fetch task failed");
                        }
                    }
                }
            }
        }
        self.tasks.shutdown().await;
        info!("Backend worker stopped");
    }

    fn handle_command(&mut self, command: BackendCommand) {
        match command {
            BackendCommand::Open { epoch, route } => {
                self.begin_page(epoch);
                self.open(route);
            }
            BackendCommand::Submit { epoch, form } => {
                let submit = self.submit.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let mut form = form;
                    let outcome = submit.execute(&mut form).await;
                    let action = if matches!(outcome, SubmitOutcome::LoginRequired) {
                        Action::LoginRequired
                    } else {
                        Action::Submitted {
                            epoch,
                            outcome,
                            form,
                        }
                    };
                    let _ = tx.send(action);
                });
            }
            BackendCommand::DeleteCelula { epoch, id } => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = client.delete_celula(id).await;
                    match &result {
                        Ok(()) => info!(id = %id, "Célula deleted"),
                        Err(e) => warn!(id = %id, error = %e, "Failed to delete célula"),
                    }
                    let action = if matches!(result, Err(ApiError::LoginRequired)) {
                        Action::LoginRequired
                    } else {
                        Action::Deleted { epoch, id, result }
                    };
                    let _ = tx.send(action);
                });
            }
            BackendCommand::Login(request) => {
                let login = self.login.clone();
                let session = self.session.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = login.execute(request).await;
                    if let Ok(response) = &result {
                        session.remember(response.session.clone()).await;
                    }
                    let _ = tx.send(Action::LoginFinished(result));
                });
            }
            BackendCommand::Logout => {
                self.tasks.abort_all();
                let logout = self.logout.clone();
                let session = self.session.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    session.forget().await;
                    if let Err(e) = logout.execute().await {
                        warn!(error = %e, "Failed to clear stored session");
                    }
                    let _ = tx.send(Action::LoggedOut);
                });
            }
        }
    }

    fn begin_page(&mut self, epoch: Epoch) {
        if !self.tasks.is_empty() {
            debug!(
                previous = self.epoch,
                next = epoch,
                pending = self.tasks.len(),
                "Aborting fetches of previous page"
            );
        }
        self.tasks.abort_all();
        self.epoch = epoch;
    }

    fn spawn<F>(&mut self, fetch: F)
    where
        F: Future<Output = PageData> + Send + 'static,
    {
        let emitter = Emitter {
            epoch: self.epoch,
            tx: self.action_tx.clone(),
        };
        self.tasks.spawn(async move {
            emitter.send(fetch.await);
        });
    }

    fn open(&mut self, route: Route) {
        debug!(route = %route, epoch = self.epoch, "Opening page");
        let c = self.client.clone();
        match route {
            Route::Login => {}
            Route::Dashboard => self.spawn(async move {
                let (celulas, redes, cultos, turmas) = tokio::join!(
                    c.list_celulas(),
                    c.list_redes(),
                    c.list_cultos(),
                    c.list_turmas()
                );
                PageData::Dashboard(DashboardCounts {
                    celulas: celulas.map(|v| v.len()),
                    redes: redes.map(|v| v.len()),
                    cultos: cultos.map(|v| v.len()),
                    turmas: turmas.map(|v| v.len()),
                })
            }),
            Route::Celulas => self.spawn(async move { PageData::Celulas(c.list_celulas().await) }),
            Route::Celula(id) => {
                let (c1, c2) = (c.clone(), c.clone());
                self.spawn(async move { PageData::Celula(c.get_celula(id).await) });
                self.spawn(async move { PageData::Encontros(c1.list_encontros(id).await) });
                self.spawn(async move { PageData::Membros(c2.list_membros(id).await) });
            }
            Route::Redes => self.spawn(async move { PageData::Redes(c.list_redes().await) }),
            Route::Supervisores => {
                self.spawn(async move { PageData::Supervisores(c.list_supervisores().await) });
            }
            Route::Cultos => self.spawn(async move { PageData::Cultos(c.list_cultos().await) }),
            Route::Culto(id) => self.spawn(async move { PageData::Culto(c.get_culto(id).await) }),
            Route::Turmas => self.spawn(async move { PageData::Turmas(c.list_turmas().await) }),
            Route::Turma(id) => {
                let (c1, c2) = (c.clone(), c.clone());
                self.spawn(async move { PageData::Turma(c.get_turma(id).await) });
                self.spawn(async move { PageData::Alunos(c1.list_alunos(id).await) });
                self.spawn(async move { PageData::Aulas(c2.list_aulas(id).await) });
            }
            Route::NovaCelula
            | Route::EditarCelula(_)
            | Route::NovoMembro(_)
            | Route::NovoEncontro(_)
            | Route::NovaRede
            | Route::NovoCulto
            | Route::EditarCulto(_) => self.open_form(route),
        }
    }

    fn open_form(&mut self, route: Route) {
        match route {
            Route::EditarCelula(id) => {
                let c = self.client.clone();
                self.spawn(async move { PageData::Celula(c.get_celula(id).await) });
            }
            Route::EditarCulto(id) => {
                let c = self.client.clone();
                self.spawn(async move { PageData::Culto(c.get_culto(id).await) });
            }
            _ => {}
        }

        let Some(kind) = form_kind(route) else {
            return;
        };
        for source in kind.remote_sources() {
            let c = self.client.clone();
            self.spawn(async move {
                let result = load_options(&c, kind, source).await;
                if let Err(e) = &result {
                    warn!(?source, error = %e, "Failed to load form options");
                }
                PageData::Options { source, result }
            });
        }
    }
}

/// Converts an option fetch into what the form shows.
#[must_use]
pub fn options_state(
    source: OptionSource,
    result: Result<Vec<SelectOption>, ApiError>,
) -> OptionsState {
    match result {
        Ok(options) => OptionsState::Ready(options),
        Err(_) => OptionsState::Failed(source.failure_message().to_string()),
    }
}

async fn load_options(
    client: &GestaoClient,
    kind: FormKind,
    source: OptionSource,
) -> Result<Vec<SelectOption>, ApiError> {
    match (source, kind) {
        (OptionSource::Supervisores, _) => client
            .list_supervisores()
            .await
            .map(|s| SelectOption::from_supervisores(&s)),
        (OptionSource::Redes, _) => client
            .list_redes()
            .await
            .map(|r| SelectOption::from_redes(&r)),
        (OptionSource::MembrosDaCelula, FormKind::Encontro { celula }) => client
            .list_membros(celula)
            .await
            .map(|m| SelectOption::from_membros(&m)),
        (OptionSource::MembrosDaCelula, _) => Ok(Vec::new()),
        (OptionSource::DiasDaSemana, _) => Ok(Vec::new()),
    }
}
