use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget},
};

use crate::domain::Route;
use crate::domain::entities::RecordId;
use crate::domain::errors::ApiError;
use crate::presentation::tables::{RowAction, TableRow};
use crate::presentation::widgets::{DataTable, TableCursor};

use super::{Loadable, PageAction, render_status};

/// A top-level entity list with an optional "Novo" button.
pub struct ListPage<T> {
    title: &'static str,
    rows: Loadable<Vec<T>>,
    cursor: TableCursor,
    create_route: Option<Route>,
    confirm_delete: Option<(RecordId, String)>,
}

impl<T: TableRow> ListPage<T> {
    #[must_use]
    pub fn new(title: &'static str, create_route: Option<Route>) -> Self {
        Self {
            title,
            rows: Loadable::Loading,
            cursor: TableCursor::new(),
            create_route,
            confirm_delete: None,
        }
    }

    pub fn set_rows(&mut self, result: Result<Vec<T>, ApiError>) {
        self.rows = Loadable::from_result(result);
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.rows.is_loading()
    }

    #[must_use]
    pub const fn is_confirming(&self) -> bool {
        self.confirm_delete.is_some()
    }

    fn selected(&self) -> Option<&T> {
        let rows = self.rows.rows();
        self.cursor.selected(rows.len()).and_then(|i| rows.get(i))
    }

    fn navigate(&self, action: RowAction) -> PageAction {
        if !T::ACTIONS.contains(&action) {
            return PageAction::Ignored;
        }
        self.selected()
            .and_then(|row| row.route_for(action))
            .map_or(PageAction::Handled, PageAction::Navigate)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        if let Some((id, _)) = &self.confirm_delete {
            let id = *id;
            return match key.code {
                KeyCode::Char('s' | 'S' | 'y') => {
                    self.confirm_delete = None;
                    PageAction::DeleteCelula(id)
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.confirm_delete = None;
                    PageAction::Handled
                }
                _ => PageAction::Handled,
            };
        }

        let len = self.rows.rows().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.next(len);
                PageAction::Handled
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor.previous(len);
                PageAction::Handled
            }
            KeyCode::Enter => self.navigate(RowAction::Detalhes),
            KeyCode::Char('e') => self.navigate(RowAction::Editar),
            KeyCode::Char('x') | KeyCode::Delete if T::ACTIONS.contains(&RowAction::Excluir) => {
                if let Some(row) = self.selected() {
                    self.confirm_delete = Some((row.id(), row.display_name().to_string()));
                }
                PageAction::Handled
            }
            KeyCode::Char('n') => self
                .create_route
                .map_or(PageAction::Ignored, PageAction::Navigate),
            _ => PageAction::Ignored,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if render_status(&self.rows, self.title, area, buf) {
            return;
        }

        let [toolbar, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        if let Some(route) = self.create_route {
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" [n] {} ", route.title()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {} registros", self.rows.rows().len())),
            ]))
            .render(toolbar, buf);
        }

        DataTable::new(self.title, self.rows.rows()).render(body, buf, &mut self.cursor);

        if let Some((_, name)) = &self.confirm_delete {
            render_confirm(name, area, buf);
        }
    }
}

fn render_confirm(name: &str, area: Rect, buf: &mut Buffer) {
    let width = 50.min(area.width);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(5) / 2,
        width,
        5.min(area.height),
    );
    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(format!("Excluir \"{name}\"?")),
        Line::from(Span::styled(
            "s: confirmar | n: cancelar",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirmar exclusão "),
    )
    .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Celula, Rede};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn celulas_page() -> ListPage<Celula> {
        let mut page = ListPage::new("Células", Some(Route::NovaCelula));
        let mut a = Celula::new("Hope 1", "Ana");
        a.id = RecordId(1);
        let mut b = Celula::new("Hope 2", "Bia");
        b.id = RecordId(2);
        page.set_rows(Ok(vec![a, b]));
        page
    }

    #[test]
    fn test_enter_opens_selected_row() {
        let mut page = celulas_page();
        page.handle_key(key(KeyCode::Down));
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter)),
            PageAction::Navigate(Route::Celula(RecordId(2)))
        ));
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('e'))),
            PageAction::Navigate(Route::EditarCelula(RecordId(2)))
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut page = celulas_page();
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('x'))),
            PageAction::Handled
        ));
        assert!(page.is_confirming());
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('s'))),
            PageAction::DeleteCelula(RecordId(1))
        ));
        assert!(!page.is_confirming());
    }

    #[test]
    fn test_delete_can_be_cancelled() {
        let mut page = celulas_page();
        page.handle_key(key(KeyCode::Char('x')));
        assert!(matches!(
            page.handle_key(key(KeyCode::Esc)),
            PageAction::Handled
        ));
        assert!(!page.is_confirming());
    }

    #[test]
    fn test_redes_cannot_be_deleted_or_opened() {
        let mut page: ListPage<Rede> = ListPage::new("Redes", Some(Route::NovaRede));
        page.set_rows(Ok(vec![Rede::new("Jovens")]));
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('x'))),
            PageAction::Ignored
        ));
        assert!(!page.is_confirming());
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter)),
            PageAction::Ignored
        ));
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('n'))),
            PageAction::Navigate(Route::NovaRede)
        ));
    }
}
