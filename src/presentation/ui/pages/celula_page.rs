//! Célula detail: header card plus encontros and membros tables.
//!
//! The three fetches are independent. Only the célula itself decides whether the page
//! failed; a failed child list shows an empty table with its own error line.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::domain::Route;
use crate::domain::entities::{Celula, Encontro, Membro, RecordId};
use crate::presentation::ui::backend::PageData;
use crate::presentation::widgets::{DataTable, TableCursor};

use super::{Loadable, PageAction, render_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Encontros,
    Membros,
}

pub struct CelulaPage {
    id: RecordId,
    celula: Loadable<Celula>,
    encontros: Loadable<Vec<Encontro>>,
    membros: Loadable<Vec<Membro>>,
    focus: Section,
    encontros_cursor: TableCursor,
    membros_cursor: TableCursor,
}

impl CelulaPage {
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            celula: Loadable::Loading,
            encontros: Loadable::Loading,
            membros: Loadable::Loading,
            focus: Section::Encontros,
            encontros_cursor: TableCursor::new(),
            membros_cursor: TableCursor::new(),
        }
    }

    pub fn apply(&mut self, data: PageData) {
        match data {
            PageData::Celula(result) => self.celula = Loadable::from_result(result),
            PageData::Encontros(result) => self.encontros = Loadable::from_result(result),
            PageData::Membros(result) => self.membros = Loadable::from_result(result),
            other => tracing::debug!(?other, "Ignored on célula page"),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.celula.is_loading() || self.encontros.is_loading() || self.membros.is_loading()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Section::Encontros => Section::Membros,
                    Section::Membros => Section::Encontros,
                };
                PageAction::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.focus {
                    Section::Encontros => self.encontros_cursor.next(self.encontros.rows().len()),
                    Section::Membros => self.membros_cursor.next(self.membros.rows().len()),
                }
                PageAction::Handled
            }
            KeyCode::Up | KeyCode::Char('k') => {
                match self.focus {
                    Section::Encontros => {
                        self.encontros_cursor.previous(self.encontros.rows().len());
                    }
                    Section::Membros => self.membros_cursor.previous(self.membros.rows().len()),
                }
                PageAction::Handled
            }
            KeyCode::Char('e') => PageAction::Navigate(Route::EditarCelula(self.id)),
            KeyCode::Char('m') => PageAction::Navigate(Route::NovoMembro(self.id)),
            KeyCode::Char('n') => PageAction::Navigate(Route::NovoEncontro(self.id)),
            _ => PageAction::Ignored,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if render_status(&self.celula, "Detalhes da célula", area, buf) {
            return;
        }
        let Some(celula) = self.celula.ready() else {
            return;
        };

        let [header, encontros, membros] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        render_header(celula, header, buf);

        let encontros_title = section_title("Encontros", &self.encontros);
        DataTable::new(&encontros_title, self.encontros.rows())
            .error(self.encontros.error())
            .focused(self.focus == Section::Encontros)
            .render(encontros, buf, &mut self.encontros_cursor);

        let membros_title = section_title("Membros", &self.membros);
        DataTable::new(&membros_title, self.membros.rows())
            .error(self.membros.error())
            .focused(self.focus == Section::Membros)
            .render(membros, buf, &mut self.membros_cursor);
    }
}

fn section_title<T>(name: &str, state: &Loadable<Vec<T>>) -> String {
    match state {
        Loadable::Loading => format!("{name} (carregando...)"),
        Loadable::Ready(rows) => format!("{name} ({})", rows.len()),
        Loadable::Failed(_) => name.to_string(),
    }
}

fn render_header(celula: &Celula, area: Rect, buf: &mut Buffer) {
    let label = Style::default().fg(Color::DarkGray);
    let field = |name: &'static str, value: String| {
        vec![Span::styled(format!("{name}: "), label), Span::raw(value)]
    };

    let mut first = field("Líder", celula.lider.clone());
    first.push(Span::raw("   "));
    first.extend(field("Supervisor", celula.supervisor.clone()));
    first.push(Span::raw("   "));
    first.extend(field("Rede", celula.rede.clone()));

    let mut second = field("Local", celula.local.clone());
    second.push(Span::raw("   "));
    second.extend(field(
        "Quando",
        format!("{} às {}", celula.dia_da_semana_label(), celula.horario),
    ));
    second.push(Span::raw("   "));
    second.extend(field("Membros", celula.qtd_membros.to_string()));

    Paragraph::new(vec![Line::from(first), Line::from(second)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    format!(" {} ", celula.nome),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ApiError;

    fn rendered(page: &mut CelulaPage) -> String {
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_celula() -> Celula {
        let mut celula = Celula::new("Hope 3", "Ana");
        celula.id = RecordId(3);
        celula
    }

    #[test]
    fn test_failed_membros_render_empty_table_with_error() {
        let mut page = CelulaPage::new(RecordId(3));
        page.apply(PageData::Celula(Ok(loaded_celula())));
        page.apply(PageData::Encontros(Ok(Vec::new())));
        page.apply(PageData::Membros(Err(ApiError::http(500, "erro no servidor"))));
        assert!(!page.is_loading());

        let output = rendered(&mut page);
        assert!(output.contains("Hope 3"));
        assert!(output.contains("Telefone"));
        assert!(output.contains("erro no servidor"));
        assert!(!output.contains("Erro ao carregar"));
    }

    #[test]
    fn test_failed_celula_fails_the_page() {
        let mut page = CelulaPage::new(RecordId(3));
        page.apply(PageData::Celula(Err(ApiError::http(404, "não encontrada"))));
        page.apply(PageData::Membros(Ok(Vec::new())));

        let output = rendered(&mut page);
        assert!(output.contains("Erro ao carregar"));
        assert!(output.contains("não encontrada"));
    }

    #[test]
    fn test_children_arrive_in_any_order() {
        let mut page = CelulaPage::new(RecordId(3));
        page.apply(PageData::Membros(Ok(Vec::new())));
        assert!(page.is_loading());
        page.apply(PageData::Encontros(Ok(Vec::new())));
        page.apply(PageData::Celula(Ok(loaded_celula())));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_shortcuts_target_this_celula() {
        use crossterm::event::KeyModifiers;
        let mut page = CelulaPage::new(RecordId(3));
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert!(matches!(
            page.handle_key(key('m')),
            PageAction::Navigate(Route::NovoMembro(RecordId(3)))
        ));
        assert!(matches!(
            page.handle_key(key('n')),
            PageAction::Navigate(Route::NovoEncontro(RecordId(3)))
        ));
        assert!(matches!(
            page.handle_key(key('e')),
            PageAction::Navigate(Route::EditarCelula(RecordId(3)))
        ));
    }
}
