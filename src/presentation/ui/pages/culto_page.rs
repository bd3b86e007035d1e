use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Widget},
};

use crate::domain::Route;
use crate::domain::entities::{Culto, RecordId};
use crate::domain::errors::ApiError;
use crate::presentation::tables::format_date;

use super::{Loadable, PageAction, render_status};

/// One culto with its attendance broken down as a bar chart.
pub struct CultoPage {
    id: RecordId,
    culto: Loadable<Culto>,
}

impl CultoPage {
    #[must_use]
    pub const fn new(id: RecordId) -> Self {
        Self {
            id,
            culto: Loadable::Loading,
        }
    }

    pub fn set_culto(&mut self, result: Result<Culto, ApiError>) {
        self.culto = Loadable::from_result(result);
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.culto.is_loading()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        match key.code {
            KeyCode::Char('e') => PageAction::Navigate(Route::EditarCulto(self.id)),
            _ => PageAction::Ignored,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if render_status(&self.culto, "Culto", area, buf) {
            return;
        }
        let Some(culto) = self.culto.ready() else {
            return;
        };

        let [summary, chart] =
            Layout::vertical([Constraint::Length(5), Constraint::Fill(1)]).areas(area);

        let label = Style::default().fg(Color::DarkGray);
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Data: ", label),
                Span::raw(format_date(culto.data)),
                Span::raw("   "),
                Span::styled("Pastor: ", label),
                Span::raw(culto.pastor.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Total de presentes: ", label),
                Span::styled(
                    culto.total_presentes().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", culto.nome)),
        )
        .render(summary, buf);

        BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Presença "),
            )
            .data(attendance(culto).as_slice())
            .bar_width(11)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .render(chart, buf);
    }
}

fn attendance(culto: &Culto) -> Vec<(&'static str, u64)> {
    vec![
        ("Jovens", u64::from(culto.qtd_jovens)),
        ("Adultos", u64::from(culto.qtd_adultos)),
        ("Crianças", u64::from(culto.qtd_criancas)),
        ("Visitantes", u64::from(culto.qtd_visitantes)),
        ("Batismos", u64::from(culto.qtd_batismo)),
        ("Conversões", u64::from(culto.qtd_conversao)),
    ]
}
