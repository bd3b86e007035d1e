//! Main application orchestrator.
//!
//! The app owns the screen and the notification queue. It never awaits network calls
//! itself: every fetch or write becomes a [`BackendCommand`], and results come back as
//! [`Action`]s on the same `select!` loop that reads the terminal.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Tabs,
};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::forms::FormState;
use crate::application::services::NotificationManager;
use crate::application::use_cases::{ResolvedSession, SubmitOutcome};
use crate::domain::Route;
use crate::domain::errors::AuthError;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::widgets::{StatusBar, StatusLevel};

use super::backend::{Action, BackendCommand, Epoch};
use super::login_screen::{LoginAction, LoginScreen, LoginState};
use super::notification_popup::NotificationPopup;
use super::pages::{Page, PageAction};

const TICK_RATE: Duration = Duration::from_millis(250);

const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";

enum CurrentScreen {
    Login(LoginScreen),
    Page { route: Route, page: Page },
}

pub struct App {
    screen: CurrentScreen,
    epoch: Epoch,
    command_tx: mpsc::UnboundedSender<BackendCommand>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    notifications: NotificationManager,
    user_email: Option<String>,
    persist_session: bool,
    /// Where to go once the user signs in.
    pending_route: Route,
    exiting: bool,
}

impl App {
    #[must_use]
    pub fn new(
        command_tx: mpsc::UnboundedSender<BackendCommand>,
        action_rx: mpsc::UnboundedReceiver<Action>,
        notification_duration: Duration,
        persist_session: bool,
    ) -> Self {
        Self {
            screen: CurrentScreen::Login(LoginScreen::new(persist_session)),
            epoch: 0,
            command_tx,
            action_rx,
            notifications: NotificationManager::new(notification_duration),
            user_email: None,
            persist_session,
            pending_route: Route::Dashboard,
            exiting: false,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        resolved: Option<ResolvedSession>,
        initial_route: Route,
    ) -> color_eyre::Result<()> {
        let initial_route = if initial_route == Route::Login {
            Route::Dashboard
        } else {
            initial_route
        };
        self.start(resolved, initial_route);
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    fn start(&mut self, resolved: Option<ResolvedSession>, initial_route: Route) {
        match resolved {
            Some(resolved) => {
                info!(source = %resolved.source, "Starting with existing session");
                self.user_email = Some(resolved.session.user.email);
                self.navigate(initial_route);
            }
            None => {
                info!("No session found, showing login screen");
                self.pending_route = initial_route;
            }
        }
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                _ = tick.tick() => {
                    self.notifications.tick();
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_terminal_event(event) == EventResult::Exit {
                            self.exiting = true;
                        }
                    }
                    Some(Err(e)) => warn!(error = %e, "Failed to read terminal event"),
                    None => self.exiting = true,
                }
            }
            terminal.draw(|frame| self.render(frame))?;
        }
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.handle_key(KeyEvent::from(KeyCode::Down)),
                MouseEventKind::ScrollUp => self.handle_key(KeyEvent::from(KeyCode::Up)),
                _ => EventResult::Continue,
            },
            _ => EventResult::Continue,
        }
    }

    fn send(&self, command: BackendCommand) {
        if self.command_tx.send(command).is_err() {
            error!("Backend worker is gone");
        }
    }

    /// Opens a fresh page for `route` and asks the backend to load it.
    fn navigate(&mut self, route: Route) {
        self.epoch += 1;
        let Some(page) = Page::for_route(route) else {
            self.show_login(None);
            return;
        };
        info!(route = %route, epoch = self.epoch, "Navigating");
        self.screen = CurrentScreen::Page { route, page };
        self.send(BackendCommand::Open {
            epoch: self.epoch,
            route,
        });
    }

    /// Switches to the login screen and cancels whatever the last page was loading.
    fn show_login(&mut self, message: Option<&str>) {
        self.epoch += 1;
        self.send(BackendCommand::Open {
            epoch: self.epoch,
            route: Route::Login,
        });
        self.screen = CurrentScreen::Login(match message {
            Some(message) => LoginScreen::with_message(self.persist_session, message),
            None => LoginScreen::new(self.persist_session),
        });
    }

    fn current_route(&self) -> Option<Route> {
        match &self.screen {
            CurrentScreen::Page { route, .. } => Some(*route),
            CurrentScreen::Login(_) => None,
        }
    }

    fn require_login(&mut self) {
        let Some(route) = self.current_route() else {
            return;
        };
        warn!(route = %route, "Session missing or expired");
        self.pending_route = route;
        self.user_email = None;
        self.show_login(Some(SESSION_EXPIRED));
    }

    fn logout(&mut self) {
        info!("Logging out");
        self.user_email = None;
        self.pending_route = Route::Dashboard;
        self.show_login(None);
        self.send(BackendCommand::Logout);
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_force_quit_event(&key) {
            return EventResult::Exit;
        }

        let CurrentScreen::Page { route, page } = &mut self.screen else {
            return self.handle_login_key(key);
        };
        let route = *route;
        let captures_text = page.captures_text();
        match page.handle_key(key) {
            PageAction::Ignored => return self.handle_global_key(key, route, captures_text),
            PageAction::Handled => {}
            PageAction::Navigate(target) => self.navigate(target),
            PageAction::Submit(form) => {
                debug!(kind = ?form.kind(), "Submitting form");
                self.send(BackendCommand::Submit {
                    epoch: self.epoch,
                    form,
                });
            }
            PageAction::DeleteCelula(id) => self.send(BackendCommand::DeleteCelula {
                epoch: self.epoch,
                id,
            }),
        }
        EventResult::Continue
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> EventResult {
        let CurrentScreen::Login(screen) = &mut self.screen else {
            return EventResult::Continue;
        };
        if EventHandler::is_back_event(&key) {
            return EventResult::Exit;
        }
        if screen.state() == LoginState::Validating {
            return EventResult::Continue;
        }
        if screen.handle_key(key) == LoginAction::Submit {
            if let Some(request) = screen.request() {
                debug!(email = %request.email, "Submitting login");
                screen.set_validating();
                self.send(BackendCommand::Login(request));
            }
        }
        EventResult::Continue
    }

    fn handle_global_key(&mut self, key: KeyEvent, route: Route, captures_text: bool) -> EventResult {
        if EventHandler::is_back_event(&key) {
            if let Some(parent) = route.parent() {
                self.navigate(parent);
            }
        } else if EventHandler::is_logout_event(&key) {
            self.logout();
        } else if captures_text {
            // plain letters belong to the page
        } else if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        } else if EventHandler::is_reload_event(&key) {
            self.navigate(route);
        } else if let Some(section) = EventHandler::section_shortcut(&key) {
            self.navigate(section);
        }
        EventResult::Continue
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Page { epoch, data } => {
                if epoch != self.epoch {
                    debug!(epoch, current = self.epoch, "Discarding stale page data");
                    return;
                }
                if let CurrentScreen::Page { page, .. } = &mut self.screen {
                    page.apply(data);
                }
            }
            Action::Submitted {
                epoch,
                outcome,
                form,
            } => {
                let current = epoch == self.epoch;
                match outcome {
                    SubmitOutcome::Saved {
                        notification,
                        navigate_to,
                    } => {
                        self.notifications.push(notification);
                        if current {
                            self.navigate(navigate_to);
                        }
                    }
                    SubmitOutcome::Failed { notification } => {
                        self.notifications.push(notification);
                        self.restore_form(current, *form);
                    }
                    SubmitOutcome::Invalid(_) => self.restore_form(current, *form),
                    SubmitOutcome::LoginRequired => self.require_login(),
                }
            }
            Action::Deleted { epoch, id, result } => match result {
                Ok(()) => {
                    self.notifications
                        .success("Célula excluída", format!("A célula {id} foi removida."));
                    if epoch == self.epoch && self.current_route() == Some(Route::Celulas) {
                        self.navigate(Route::Celulas);
                    }
                }
                Err(e) => self
                    .notifications
                    .error("Erro ao excluir célula", e.user_message()),
            },
            Action::LoginRequired => self.require_login(),
            Action::LoginFinished(Ok(response)) => {
                info!(email = %response.user().email, "Signed in");
                self.user_email = Some(response.user().email.clone());
                if self.persist_session && !response.session_persisted {
                    self.notifications.info(
                        "Sessão não salva",
                        "Não foi possível guardar a sessão no chaveiro do sistema.",
                    );
                }
                let target = self.pending_route;
                self.navigate(target);
            }
            Action::LoginFinished(Err(e)) => {
                error!(error = %e, "Login failed");
                if let CurrentScreen::Login(screen) = &mut self.screen {
                    screen.set_error(login_error_message(&e));
                }
            }
            Action::LoggedOut => self
                .notifications
                .info("Sessão encerrada", "Você saiu da conta."),
        }
    }

    fn restore_form(&mut self, current: bool, form: FormState) {
        if !current {
            debug!("Form result arrived after navigation");
            return;
        }
        if let CurrentScreen::Page { page, .. } = &mut self.screen {
            page.restore_form(form);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match &mut self.screen {
            CurrentScreen::Login(screen) => frame.render_widget(&*screen, area),
            CurrentScreen::Page { route, page } => {
                let [tabs_area, body, status_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Fill(1),
                    Constraint::Length(1),
                ])
                .areas(area);

                frame.render_widget(section_tabs(*route), tabs_area);
                page.render(body, frame.buffer_mut());

                let level = if page.is_loading() {
                    StatusLevel::Loading
                } else {
                    StatusLevel::Info
                };
                let status = StatusBar::new()
                    .left(route.path())
                    .center(page.hints())
                    .right(self.user_email.clone().unwrap_or_default())
                    .level(level);
                frame.render_widget(&status, status_area);
            }
        }

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification), area);
        }
    }
}

fn section_tabs(route: Route) -> Tabs<'static> {
    let section = route.section();
    let selected = Route::SECTIONS.iter().position(|r| *r == section);
    Tabs::new(
        Route::SECTIONS
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{} {}", i + 1, r.title())),
    )
    .select(selected.unwrap_or(0))
    .style(Style::default().fg(Color::Gray))
    .highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )
}

fn login_error_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials { .. } => "Email ou senha inválidos.".to_string(),
        AuthError::NetworkError { .. } => "Não foi possível conectar ao servidor.".to_string(),
        AuthError::RateLimited { .. } => {
            "Muitas tentativas. Aguarde um pouco e tente novamente.".to_string()
        }
        AuthError::NotConfigured { missing } => {
            format!("Login indisponível: configure {missing}.")
        }
        other => other.to_string(),
    }
}
