//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Validating,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFocus {
    Email,
    Password,
    Remember,
}

impl LoginFocus {
    const fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Remember,
            Self::Remember => Self::Email,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Email => Self::Remember,
            Self::Password => Self::Email,
            Self::Remember => Self::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
}

/// Email and password form shown before any session exists.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    focus: LoginFocus,
    state: LoginState,
    error_message: Option<String>,
    persist_session: bool,
}

impl LoginScreen {
    #[must_use]
    pub fn new(persist_session: bool) -> Self {
        let mut email_input = TextInput::new(" Email ").placeholder("seu@email.com");
        email_input.set_focused(true);
        let password_input = TextInput::new(" Senha ").password();

        Self {
            email_input,
            password_input,
            focus: LoginFocus::Email,
            state: LoginState::Input,
            error_message: None,
            persist_session,
        }
    }

    /// Login screen opened after the session was lost, with a reason line.
    #[must_use]
    pub fn with_message(persist_session: bool, message: impl Into<String>) -> Self {
        let mut screen = Self::new(persist_session);
        screen.set_error(message);
        screen
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Request built from the current input, if both fields are filled.
    #[must_use]
    pub fn request(&self) -> Option<LoginRequest> {
        let email = self.email_input.value().trim();
        let password = self.password_input.value();
        if email.is_empty() || password.is_empty() {
            return None;
        }
        let request = LoginRequest::new(email, password);
        Some(if self.persist_session {
            request
        } else {
            request.without_persistence()
        })
    }

    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.persist_session
    }

    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    fn set_focus(&mut self, focus: LoginFocus) {
        self.focus = focus;
        self.email_input.set_focused(focus == LoginFocus::Email);
        self.password_input.set_focused(focus == LoginFocus::Password);
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            LoginFocus::Email => Some(&mut self.email_input),
            LoginFocus::Password => Some(&mut self.password_input),
            LoginFocus::Remember => None,
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        if self.state == LoginState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Enter => {
                if self.request().is_some() {
                    return LoginAction::Submit;
                }
                self.set_focus(self.focus.next());
            }
            KeyCode::Tab | KeyCode::Down => self.set_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.set_focus(self.focus.previous()),
            KeyCode::Char(' ') if self.focus == LoginFocus::Remember => {
                self.persist_session = !self.persist_session;
            }
            code => {
                if let Some(input) = self.focused_input() {
                    match code {
                        KeyCode::Char(c) => input.input_char(c),
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.move_start(),
                        KeyCode::End => input.move_end(),
                        _ => {}
                    }
                }
            }
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Gestão de Células ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [title, _, email, password, _, remember, _, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("Entre com seu email e senha")
            .style(Style::default().fg(Color::White))
            .render(title, buf);

        (&self.email_input).render(email, buf);
        (&self.password_input).render(password, buf);

        let checkbox = if self.persist_session { "[x]" } else { "[ ]" };
        let label_style = if self.focus == LoginFocus::Remember {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Paragraph::new(Line::from(vec![
            Span::styled(checkbox, Style::default().fg(Color::Yellow)),
            Span::styled(" Manter conectado (Espaço alterna)", label_style),
        ]))
        .render(remember, buf);

        let line = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Enter: Entrar", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Tab: Próximo campo", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Esc: Sair", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Validating => Line::from(Span::styled(
                "Entrando...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Erro desconhecido");
                Line::from(Span::styled(msg, Style::default().fg(Color::Red)))
            }
        };
        Paragraph::new(line).render(status, buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new(true);
        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.request().is_none());
        assert!(screen.should_persist());
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut screen = LoginScreen::new(true);
        type_text(&mut screen, "ana@igreja.org");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "segredo");

        let request = screen.request().unwrap();
        assert_eq!(request.email, "ana@igreja.org");
        assert_eq!(request.password, "segredo");
        assert!(request.persist_session);
    }

    #[test]
    fn test_enter_without_password_moves_focus() {
        let mut screen = LoginScreen::new(true);
        type_text(&mut screen, "ana@igreja.org");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        type_text(&mut screen, "x");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_space_toggles_persistence_only_on_checkbox() {
        let mut screen = LoginScreen::new(true);
        screen.handle_key(key(KeyCode::BackTab));
        screen.handle_key(key(KeyCode::Char(' ')));
        assert!(!screen.should_persist());

        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Char(' ')));
        assert!(!screen.should_persist());
        assert_eq!(screen.email_input.value(), " ");
    }

    #[test]
    fn test_request_without_persistence() {
        let mut screen = LoginScreen::new(false);
        type_text(&mut screen, "a@b.c");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "pw");
        assert!(!screen.request().unwrap().persist_session);
    }

    #[test]
    fn test_validating_ignores_keys() {
        let mut screen = LoginScreen::new(true);
        screen.set_validating();
        screen.handle_key(key(KeyCode::Char('a')));
        assert_eq!(screen.email_input.value(), "");
    }

    #[test]
    fn test_error_clears_on_next_key() {
        let mut screen = LoginScreen::with_message(true, "Sessão expirada");
        assert_eq!(screen.state(), LoginState::Error);
        screen.handle_key(key(KeyCode::Char('a')));
        assert_eq!(screen.state(), LoginState::Input);
        assert_eq!(screen.email_input.value(), "a");
    }
}
