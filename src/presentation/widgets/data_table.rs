//! Entity table widget driven by [`TableRow`] column lists.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::presentation::tables::{TableRow, cells};

const EMPTY_TEXT: &str = "Nenhum registro encontrado.";

/// Selection state of one table.
#[derive(Debug, Default, Clone)]
pub struct TableCursor {
    state: TableState,
}

impl TableCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected row index, clamped to the current row count.
    #[must_use]
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.state.selected().unwrap_or(0).min(len - 1))
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.selected(len).map_or(0, |i| (i + 1).min(len - 1));
        self.state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let previous = self.selected(len).map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(previous));
    }

    fn sync(&mut self, len: usize) {
        self.state.select(self.selected(len));
    }
}

/// Table of records with optional inline error line and action hints.
pub struct DataTable<'a, T> {
    rows: &'a [T],
    title: &'a str,
    error: Option<&'a str>,
    focused: bool,
}

impl<'a, T: TableRow> DataTable<'a, T> {
    #[must_use]
    pub const fn new(title: &'a str, rows: &'a [T]) -> Self {
        Self {
            rows,
            title,
            error: None,
            focused: true,
        }
    }

    /// Message shown under the table when its fetch failed.
    #[must_use]
    pub const fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn hints(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for action in T::ACTIONS {
            spans.push(Span::styled(
                format!(" {}: {} ", action.key_hint(), action.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl<T: TableRow> StatefulWidget for DataTable<'_, T> {
    type State = TableCursor;

    fn render(self, area: Rect, buf: &mut Buffer, cursor: &mut Self::State) {
        let border_color = if self.focused { Color::Cyan } else { Color::Gray };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.title));
        if let Some(error) = self.error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {error} "),
                Style::default().fg(Color::Red),
            )));
        } else if self.focused && !self.rows.is_empty() {
            block = block.title_bottom(self.hints());
        }

        let header = Row::new(
            T::COLUMNS
                .iter()
                .map(|column| Cell::from(column.header)),
        )
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        if self.rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            let header_area = Rect { height: 1.min(inner.height), ..inner };
            let empty = Table::new(
                Vec::<Row>::new(),
                T::COLUMNS.iter().map(|_| Constraint::Fill(1)),
            )
            .header(header);
            Widget::render(empty, header_area, buf);
            if inner.height > 2 {
                let body = Rect {
                    y: inner.y + 2,
                    height: 1,
                    ..inner
                };
                Paragraph::new(EMPTY_TEXT)
                    .style(Style::default().fg(Color::DarkGray))
                    .render(body, buf);
            }
            return;
        }

        cursor.sync(self.rows.len());
        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(cells(row).into_iter().map(Cell::from)));
        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let table = Table::new(rows, T::COLUMNS.iter().map(|_| Constraint::Fill(1)))
            .header(header)
            .block(block)
            .row_highlight_style(highlight)
            .highlight_symbol("> ");

        StatefulWidget::render(table, area, buf, &mut cursor.state);
    }
}
