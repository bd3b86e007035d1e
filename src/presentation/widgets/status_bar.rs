//! Bottom status line: current route on the left, key hints in the middle, user on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Loading,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Loading => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;

        let left_len = self.left.width();
        let center_len = self.center.width();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = vec![Span::styled(&self.left, style)];

        let left_padding = center_start.saturating_sub(left_len).max(1);
        spans.push(Span::raw(" ".repeat(left_padding)));

        if !self.center.is_empty() {
            spans.push(Span::styled(&self.center, hint_style));
        }

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }

        if !self.right.is_empty() {
            spans.push(Span::styled(&self.right, Style::default().fg(Color::Gray)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_all_three_parts() {
        let bar = StatusBar::new()
            .left("/celulas")
            .center("r: recarregar")
            .right("lider@example.com");
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        (&bar).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.starts_with("/celulas"));
        assert!(line.contains("r: recarregar"));
        assert!(line.trim_end().ends_with("lider@example.com"));
    }
}
