//! Text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text field. The cursor counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    masked: bool,
    disabled: bool,
    placeholder: String,
    label: String,
    error: Option<String>,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            masked: false,
            disabled: false,
            placeholder: String::new(),
            label: label.into(),
            error: None,
        }
    }

    /// Enables password masking.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Validation message shown on the bottom border.
    #[must_use]
    pub fn with_error(mut self, error: Option<&str>) -> Self {
        self.error = error.map(str::to_string);
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets value and puts the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(index, _)| index)
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            "•".repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text_style = if self.value.is_empty() || self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());
        if let Some(error) = &self.error {
            block = block.title_bottom(
                Line::from(format!(" {error} ")).style(Style::default().fg(Color::Red)),
            );
        }

        let inner = block.inner(area);

        let display = self.display_text();
        let paragraph = Paragraph::new(display).style(text_style);

        block.render(area, buf);
        paragraph.render(inner, buf);

        if self.focused && !self.disabled && inner.width > 0 {
            let before: String = self.display_text().chars().take(self.cursor).collect();
            let offset = if self.value.is_empty() { 0 } else { before.width() };
            let cursor_x = inner.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}
