use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::Route;
use crate::domain::errors::ApiError;
use crate::presentation::ui::backend::DashboardCounts;

use super::{Loadable, PageAction, render_status};

const CARDS: [(Route, &str); 4] = [
    (Route::Celulas, "Células"),
    (Route::Redes, "Redes"),
    (Route::Cultos, "Cultos"),
    (Route::Turmas, "Turmas"),
];

/// Overview with one count card per section.
pub struct DashboardPage {
    counts: Loadable<DashboardCounts>,
    selected: usize,
}

impl DashboardPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: Loadable::Loading,
            selected: 0,
        }
    }

    pub fn set_counts(&mut self, counts: DashboardCounts) {
        self.counts = Loadable::Ready(counts);
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.counts.is_loading()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        match key.code {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % CARDS.len();
                PageAction::Handled
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.selected = (self.selected + CARDS.len() - 1) % CARDS.len();
                PageAction::Handled
            }
            KeyCode::Enter => PageAction::Navigate(CARDS[self.selected].0),
            _ => PageAction::Ignored,
        }
    }

    fn count(counts: &DashboardCounts, index: usize) -> &Result<usize, ApiError> {
        match index {
            0 => &counts.celulas,
            1 => &counts.redes,
            2 => &counts.cultos,
            _ => &counts.turmas,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if render_status(&self.counts, "Visão Geral", area, buf) {
            return;
        }
        let Some(counts) = self.counts.ready() else {
            return;
        };

        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .areas(area);
        let cards = Layout::horizontal([Constraint::Length(22); 4])
            .flex(Flex::Center)
            .spacing(2)
            .split(row);

        for (index, ((_, label), card)) in CARDS.iter().zip(cards.iter()).enumerate() {
            let selected = index == self.selected;
            let border = if selected { Color::Cyan } else { Color::Gray };
            let value = match Self::count(counts, index) {
                Ok(count) => Line::from(Span::styled(
                    count.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Err(e) => Line::from(Span::styled(
                    e.user_message(),
                    Style::default().fg(Color::Red),
                )),
            };
            Paragraph::new(vec![Line::default(), value])
                .centered()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border))
                        .title(format!(" {label} ")),
                )
                .render(*card, buf);
        }
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cards_cycle_and_open_sections() {
        let mut page = DashboardPage::new();
        page.handle_key(key(KeyCode::Left));
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter)),
            PageAction::Navigate(Route::Turmas)
        ));
        page.handle_key(key(KeyCode::Right));
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter)),
            PageAction::Navigate(Route::Celulas)
        ));
    }

    #[test]
    fn test_one_failed_count_does_not_hide_the_others() {
        let mut page = DashboardPage::new();
        page.set_counts(DashboardCounts {
            celulas: Ok(12),
            redes: Err(ApiError::http(500, "indisponível")),
            cultos: Ok(3),
            turmas: Ok(0),
        });
        assert!(!page.is_loading());

        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("12"));
        assert!(text.contains("indisp"));
    }
}
