//! Key classification shared by every screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::Route;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Stateless key predicates.
///
/// Screens with free text input (login, forms) only honour the modified variants so that
/// plain letters keep reaching the focused field.
pub struct EventHandler;

impl EventHandler {
    /// `q` or `Ctrl+C`.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_force_quit_event(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Char('q'),
                    modifiers: KeyModifiers::NONE,
                    ..
                }
            )
    }

    /// `Ctrl+C`, honoured everywhere.
    #[must_use]
    pub fn is_force_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_back_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
    }

    /// `r` reloads the current page.
    #[must_use]
    pub fn is_reload_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('r'),
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// `Ctrl+L` signs out and clears the stored session.
    #[must_use]
    pub fn is_logout_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Enter
    }

    /// Digits `1`-`6` jump to the top-level sections.
    #[must_use]
    pub fn section_shortcut(key: &KeyEvent) -> Option<Route> {
        if !key.modifiers.is_empty() {
            return None;
        }
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let index = c.to_digit(10)?.checked_sub(1)?;
        Route::SECTIONS.get(usize::try_from(index).ok()?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_plain_c_is_not_force_quit() {
        assert!(!EventHandler::is_force_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_section_shortcuts() {
        let key = make_key_event(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(EventHandler::section_shortcut(&key), Some(Route::Celulas));

        let key = make_key_event(KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(EventHandler::section_shortcut(&key), Some(Route::Turmas));

        let key = make_key_event(KeyCode::Char('7'), KeyModifiers::NONE);
        assert_eq!(EventHandler::section_shortcut(&key), None);

        let key = make_key_event(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(EventHandler::section_shortcut(&key), None);

        let key = make_key_event(KeyCode::Char('1'), KeyModifiers::ALT);
        assert_eq!(EventHandler::section_shortcut(&key), None);
    }

    #[test]
    fn test_reload_event() {
        assert!(EventHandler::is_reload_event(&make_key_event(
            KeyCode::Char('r'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_reload_event(&make_key_event(
            KeyCode::Char('r'),
            KeyModifiers::CONTROL
        )));
    }
}
