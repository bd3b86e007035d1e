use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::domain::entities::{Aluno, Aula, RecordId, Turma};
use crate::presentation::tables::format_date;
use crate::presentation::ui::backend::PageData;
use crate::presentation::widgets::{DataTable, TableCursor};

use super::{Loadable, PageAction, render_status};

/// Turma detail with its alunos and aulas side by side.
pub struct TurmaPage {
    turma: Loadable<Turma>,
    alunos: Loadable<Vec<Aluno>>,
    aulas: Loadable<Vec<Aula>>,
    alunos_focused: bool,
    alunos_cursor: TableCursor,
    aulas_cursor: TableCursor,
}

impl TurmaPage {
    #[must_use]
    pub fn new(_id: RecordId) -> Self {
        Self {
            turma: Loadable::Loading,
            alunos: Loadable::Loading,
            aulas: Loadable::Loading,
            alunos_focused: true,
            alunos_cursor: TableCursor::new(),
            aulas_cursor: TableCursor::new(),
        }
    }

    pub fn apply(&mut self, data: PageData) {
        match data {
            PageData::Turma(result) => self.turma = Loadable::from_result(result),
            PageData::Alunos(result) => self.alunos = Loadable::from_result(result),
            PageData::Aulas(result) => self.aulas = Loadable::from_result(result),
            other => tracing::debug!(?other, "Ignored on turma page"),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.turma.is_loading() || self.alunos.is_loading() || self.aulas.is_loading()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.alunos_focused = !self.alunos_focused;
                PageAction::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.alunos_focused {
                    self.alunos_cursor.next(self.alunos.rows().len());
                } else {
                    self.aulas_cursor.next(self.aulas.rows().len());
                }
                PageAction::Handled
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.alunos_focused {
                    self.alunos_cursor.previous(self.alunos.rows().len());
                } else {
                    self.aulas_cursor.previous(self.aulas.rows().len());
                }
                PageAction::Handled
            }
            _ => PageAction::Ignored,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if render_status(&self.turma, "Turma", area, buf) {
            return;
        }
        let Some(turma) = self.turma.ready() else {
            return;
        };

        let [header, body] =
            Layout::vertical([Constraint::Length(5), Constraint::Fill(1)]).areas(area);
        let label = Style::default().fg(Color::DarkGray);
        Paragraph::new(vec![
            Line::from(turma.descricao.as_str()),
            Line::from(vec![
                Span::styled("Período: ", label),
                Span::raw(turma.periodo.as_str()),
                Span::raw("   "),
                Span::styled("De ", label),
                Span::raw(format_date(turma.data_inicio)),
                Span::styled(" até ", label),
                Span::raw(format_date(turma.data_fim)),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", turma.nome)),
        )
        .render(header, buf);

        let [alunos, aulas] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);
        DataTable::new("Alunos", self.alunos.rows())
            .error(self.alunos.error())
            .focused(self.alunos_focused)
            .render(alunos, buf, &mut self.alunos_cursor);
        DataTable::new("Aulas", self.aulas.rows())
            .error(self.aulas.error())
            .focused(!self.alunos_focused)
            .render(aulas, buf, &mut self.aulas_cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ApiError;
    use chrono::NaiveDate;

    fn turma() -> Turma {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        Turma {
            id: RecordId(1),
            nome: "Escola de Líderes".to_string(),
            descricao: "Formação de novos líderes".to_string(),
            periodo: "Noite".to_string(),
            data_inicio: date,
            data_fim: date,
        }
    }

    #[test]
    fn test_failed_aulas_keep_the_page() {
        let mut page = TurmaPage::new(RecordId(1));
        page.apply(PageData::Turma(Ok(turma())));
        page.apply(PageData::Alunos(Ok(vec![Aluno {
            id: RecordId(4),
            nome: "Joana".to_string(),
            telefone: "11 99999-0000".to_string(),
        }])));
        page.apply(PageData::Aulas(Err(ApiError::network("sem conexão"))));
        assert!(!page.is_loading());

        let area = Rect::new(0, 0, 120, 20);
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Escola de Líderes"));
        assert!(text.contains("Joana"));
        assert!(text.contains("Professor"));
    }
}
