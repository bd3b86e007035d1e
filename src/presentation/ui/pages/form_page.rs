//! Create and edit forms.
//!
//! One page drives every entity form: the schema in [`FormState`] decides which
//! fields exist and how each is edited. Typed fields go through a [`TextInput`] so
//! the cursor behaves the same as on the login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::forms::{FieldKind, FieldSpec, FormKind, FormState, OptionsState};
use crate::domain::Route;
use crate::presentation::events::EventHandler;
use crate::presentation::ui::backend::{PageData, options_state};
use crate::presentation::widgets::TextInput;

use super::{Loadable, PageAction, render_status};

const CHECKLIST_ROWS: usize = 6;

/// Which form a route opens, if any.
#[must_use]
pub const fn form_kind(route: Route) -> Option<FormKind> {
    match route {
        Route::NovaCelula | Route::EditarCelula(_) => Some(FormKind::Celula),
        Route::NovoMembro(celula) => Some(FormKind::Membro { celula }),
        Route::NovoEncontro(celula) => Some(FormKind::Encontro { celula }),
        Route::NovaRede => Some(FormKind::Rede),
        Route::NovoCulto | Route::EditarCulto(_) => Some(FormKind::Culto),
        _ => None,
    }
}

pub struct FormPage {
    form: FormState,
    /// The record being edited. Always ready in create mode.
    record: Loadable<()>,
    focus: usize,
    editor: TextInput,
    checklist_cursor: usize,
    submitting: bool,
}

impl FormPage {
    #[must_use]
    pub fn for_route(route: Route) -> Option<Self> {
        let kind = form_kind(route)?;
        let editing = matches!(route, Route::EditarCelula(_) | Route::EditarCulto(_));
        let mut page = Self {
            form: FormState::new(kind),
            record: if editing {
                Loadable::Loading
            } else {
                Loadable::Ready(())
            },
            focus: 0,
            editor: TextInput::new(""),
            checklist_cursor: 0,
            submitting: false,
        };
        page.focus_on(0);
        Some(page)
    }

    pub fn apply(&mut self, data: PageData) {
        match data {
            PageData::Celula(Ok(celula)) if self.form.kind() == FormKind::Celula => {
                self.load_record(FormState::edit_celula(&celula));
            }
            PageData::Culto(Ok(culto)) if self.form.kind() == FormKind::Culto => {
                self.load_record(FormState::edit_culto(&culto));
            }
            PageData::Celula(Err(e)) | PageData::Culto(Err(e)) => {
                self.record = Loadable::from_result(Err(e));
            }
            PageData::Options { source, result } => {
                self.form.set_options(source, options_state(source, result));
                self.focus_on(self.focus);
            }
            other => tracing::debug!(?other, "Ignored on form page"),
        }
    }

    /// Swaps in the pre-filled form, keeping options that already arrived.
    fn load_record(&mut self, mut form: FormState) {
        for source in self.form.kind().remote_sources() {
            let state = self.form.options(source);
            if !state.is_loading() {
                form.set_options(source, state.clone());
            }
        }
        self.form = form;
        self.record = Loadable::Ready(());
        self.focus_on(0);
    }

    /// Puts back a form the backend could not save, keeping what the user typed.
    pub fn restore(&mut self, form: FormState) {
        self.form = form;
        self.submitting = false;
        let focus = self
            .form
            .errors()
            .first_field()
            .and_then(|name| self.index_of(name))
            .unwrap_or(self.focus);
        self.focus_on(focus);
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.record.is_loading() || self.form.is_loading_options()
    }

    /// Whether keys reach the fields. False while the edited record loads or failed.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.record, Loadable::Ready(()))
    }

    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    fn schema(&self) -> &'static [FieldSpec] {
        self.form.schema()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.schema().iter().position(|field| field.name == name)
    }

    fn focused_field(&self) -> Option<&'static FieldSpec> {
        self.schema().get(self.focus)
    }

    fn on_button(&self) -> bool {
        self.focus >= self.schema().len()
    }

    fn focus_on(&mut self, index: usize) {
        self.focus = index.min(self.schema().len());
        self.checklist_cursor = 0;
        if let Some(field) = self.focused_field() {
            if field.kind.is_typed() {
                self.editor = TextInput::new(format!(" {} ", field.label))
                    .with_value(self.form.text(field.name));
                self.editor.set_focused(true);
            }
        }
    }

    fn next_field(&mut self) {
        let stops = self.schema().len() + 1;
        self.focus_on((self.focus + 1) % stops);
    }

    fn previous_field(&mut self) {
        let stops = self.schema().len() + 1;
        self.focus_on((self.focus + stops - 1) % stops);
    }

    fn submit(&mut self) -> PageAction {
        match self.form.validate() {
            Ok(_) => {
                self.submitting = true;
                PageAction::Submit(Box::new(self.form.clone()))
            }
            Err(errors) => {
                if let Some(index) = errors.first_field().and_then(|name| self.index_of(name)) {
                    self.focus_on(index);
                }
                PageAction::Handled
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        if !self.is_editable() || key.code == KeyCode::Esc {
            return PageAction::Ignored;
        }
        if self.submitting {
            return PageAction::Handled;
        }
        if EventHandler::is_submit_event(&key) {
            return self.submit();
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                return PageAction::Handled;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.previous_field();
                return PageAction::Handled;
            }
            KeyCode::Enter if self.on_button() => return self.submit(),
            KeyCode::Enter => {
                self.next_field();
                return PageAction::Handled;
            }
            _ => {}
        }

        let Some(field) = self.focused_field() else {
            return PageAction::Handled;
        };
        match field.kind {
            kind if kind.is_typed() => self.edit_text(field.name, key),
            FieldKind::Select(_) => match key.code {
                KeyCode::Left => self.form.cycle_option(field.name, false),
                KeyCode::Right | KeyCode::Char(' ') => self.form.cycle_option(field.name, true),
                _ => {}
            },
            FieldKind::Flag => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    self.form.toggle_flag(field.name);
                }
            }
            FieldKind::Checklist(source) => {
                let options = self.form.options(source).options();
                let len = options.len();
                match key.code {
                    KeyCode::Right if len > 0 => {
                        self.checklist_cursor = (self.checklist_cursor + 1) % len;
                    }
                    KeyCode::Left if len > 0 => {
                        self.checklist_cursor = (self.checklist_cursor + len - 1) % len;
                    }
                    KeyCode::Char(' ') => {
                        if let Some(option) = options.get(self.checklist_cursor) {
                            let value = option.value.clone();
                            self.form.toggle_choice(field.name, &value);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        PageAction::Handled
    }

    fn edit_text(&mut self, name: &str, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.editor.input_char(c);
            }
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete(),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Home => self.editor.move_start(),
            KeyCode::End => self.editor.move_end(),
            _ => return,
        }
        self.form.set_text(name, self.editor.value());
    }

    fn field_height(&self, field: &FieldSpec) -> u16 {
        match field.kind {
            FieldKind::Checklist(source) => {
                let rows = self
                    .form
                    .options(source)
                    .options()
                    .len()
                    .clamp(1, CHECKLIST_ROWS);
                u16::try_from(rows).unwrap_or(1) + 2
            }
            _ => 3,
        }
    }

    /// First field to draw so that the focused one fits in `height` rows.
    fn scroll_start(&self, height: u16) -> usize {
        let schema = self.schema();
        let last = self.focus.min(schema.len().saturating_sub(1));
        let mut used = 0u16;
        let mut start = last;
        for index in (0..=last).rev() {
            let needed = self.field_height(&schema[index]);
            if used + needed > height {
                break;
            }
            used += needed;
            start = index;
        }
        start
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let title = self.form.title();
        if render_status(&self.record, title, area, buf) {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {title} "),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let [fields_area, button_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let mut y = fields_area.y;
        let bottom = fields_area.y + fields_area.height;
        for (index, field) in self
            .schema()
            .iter()
            .enumerate()
            .skip(self.scroll_start(fields_area.height))
        {
            let height = self.field_height(field);
            if y + height > bottom {
                break;
            }
            let slot = Rect::new(fields_area.x, y, fields_area.width, height);
            self.render_field(index, field, slot, buf);
            y += height;
        }

        let label = if self.submitting {
            "Enviando..."
        } else {
            self.form.submit_label()
        };
        let style = if self.on_button() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Paragraph::new(Line::from(Span::styled(format!("[ {label} ]"), style)))
            .centered()
            .render(button_area, buf);
    }

    fn render_field(&self, index: usize, field: &FieldSpec, area: Rect, buf: &mut Buffer) {
        let focused = index == self.focus;
        let error = self.form.errors().get(field.name);

        if field.kind.is_typed() {
            let input = if focused {
                self.editor.clone().with_error(error)
            } else {
                TextInput::new(format!(" {} ", field.label))
                    .with_value(self.form.text(field.name))
                    .with_error(error)
            };
            let input = match field.kind {
                FieldKind::Date => input.placeholder("dd/mm/aaaa"),
                FieldKind::Time => input.placeholder("HH:MM"),
                FieldKind::Amount => input.placeholder("0,00"),
                _ => input,
            };
            (&input).render(area, buf);
            return;
        }

        let border = if error.is_some() {
            Color::Red
        } else if focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", field.label));
        if let Some(error) = error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {error} "),
                Style::default().fg(Color::Red),
            )));
        }

        let lines = match field.kind {
            FieldKind::Select(source) => match self.form.options(source) {
                OptionsState::Loading => vec![loading_line()],
                OptionsState::Failed(message) => vec![failed_line(message)],
                OptionsState::Ready(_) => vec![Line::from(format!(
                    "◀ {} ▶",
                    self.form.selected_label(field.name)
                ))],
            },
            FieldKind::Flag => {
                let text = if self.form.flag(field.name) {
                    "[x] Sim"
                } else {
                    "[ ] Não"
                };
                vec![Line::from(text)]
            }
            FieldKind::Checklist(source) => match self.form.options(source) {
                OptionsState::Loading => vec![loading_line()],
                OptionsState::Failed(message) => vec![failed_line(message)],
                OptionsState::Ready(options) if options.is_empty() => vec![Line::from(
                    Span::styled("Nenhum membro cadastrado.", Style::default().fg(Color::DarkGray)),
                )],
                OptionsState::Ready(options) => {
                    let chosen = self.form.choices(field.name);
                    let skip = self.checklist_cursor.saturating_sub(CHECKLIST_ROWS - 1);
                    options
                        .iter()
                        .enumerate()
                        .skip(skip)
                        .take(CHECKLIST_ROWS)
                        .map(|(i, option)| {
                            let mark = if chosen.contains(&option.value) { "x" } else { " " };
                            let style = if focused && i == self.checklist_cursor {
                                Style::default().add_modifier(Modifier::REVERSED)
                            } else {
                                Style::default()
                            };
                            Line::from(Span::styled(format!("[{mark}] {}", option.label), style))
                        })
                        .collect()
                }
            },
            _ => Vec::new(),
        };
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

fn loading_line() -> Line<'static> {
    Line::from(Span::styled(
        "Carregando opções...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn failed_line(message: &str) -> Line<'_> {
    Line::from(Span::styled(message, Style::default().fg(Color::Red)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{OptionSource, SelectOption};
    use crate::domain::entities::{Celula, RecordId, Supervisor};
    use crate::domain::errors::ApiError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(page: &mut FormPage, text: &str) {
        for c in text.chars() {
            page.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn rendered(page: &mut FormPage) -> String {
        let area = Rect::new(0, 0, 80, 30);
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

    #[test]
    fn test_routes_map_to_forms() {
        let id = RecordId(4);
        assert_eq!(form_kind(Route::NovaCelula), Some(FormKind::Celula));
        assert_eq!(
            form_kind(Route::NovoEncontro(id)),
            Some(FormKind::Encontro { celula: id })
        );
        assert_eq!(form_kind(Route::EditarCulto(id)), Some(FormKind::Culto));
        assert_eq!(form_kind(Route::Celulas), None);
    }

    #[test]
    fn test_typed_rede_submits() {
        let mut page = FormPage::for_route(Route::NovaRede).unwrap();
        type_text(&mut page, "Jovens");
        assert_eq!(page.form().text("nome"), "Jovens");

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        match page.handle_key(ctrl_s) {
            PageAction::Submit(form) => assert_eq!(form.text("nome"), "Jovens"),
            other => panic!("expected submit, got {other:?}"),
        }
        assert!(rendered(&mut page).contains("Enviando..."));
    }

    #[test]
    fn test_invalid_form_stays_local() {
        let mut page = FormPage::for_route(Route::NovaRede).unwrap();
        page.handle_key(key(KeyCode::Tab));
        assert!(matches!(
            page.handle_key(key(KeyCode::Enter)),
            PageAction::Handled
        ));
        assert_eq!(page.form().errors().get("nome"), Some("Nome é obrigatório"));
        assert!(rendered(&mut page).contains("Nome é obrigatório"));
    }

    #[test]
    fn test_edit_waits_for_record_and_keeps_loaded_options() {
        let mut page = FormPage::for_route(Route::EditarCelula(RecordId(7))).unwrap();
        assert!(!page.is_editable());
        assert!(matches!(
            page.handle_key(key(KeyCode::Char('a'))),
            PageAction::Ignored
        ));

        page.apply(PageData::Options {
            source: OptionSource::Supervisores,
            result: Ok(SelectOption::from_supervisores(&[Supervisor::new(
                2u64, "Carlos",
            )])),
        });
        let mut celula = Celula::new("Hope 7", "Ana");
        celula.id = RecordId(7);
        celula.supervisor = "2".to_string();
        page.apply(PageData::Celula(Ok(celula)));

        assert!(page.is_editable());
        assert!(page.form().is_edit_mode());
        assert_eq!(page.form().text("nome"), "Hope 7");
        assert_eq!(page.form().selected_label("supervisor"), "Carlos");
        assert!(page.is_loading());
    }

    #[test]
    fn test_failed_record_shows_error() {
        let mut page = FormPage::for_route(Route::EditarCulto(RecordId(1))).unwrap();
        page.apply(PageData::Culto(Err(ApiError::http(404, "Culto não encontrado"))));
        assert!(!page.is_loading());
        assert!(rendered(&mut page).contains("Culto não encontrado"));
    }

    #[test]
    fn test_failed_options_render_inline_message() {
        let mut page = FormPage::for_route(Route::NovaCelula).unwrap();
        page.apply(PageData::Options {
            source: OptionSource::Redes,
            result: Err(ApiError::network("offline")),
        });
        assert!(rendered(&mut page).contains("Não foi possível carregar a lista de redes"));
    }

    #[test]
    fn test_checklist_toggles_membro() {
        let mut page = FormPage::for_route(Route::NovoEncontro(RecordId(3))).unwrap();
        page.apply(PageData::Options {
            source: OptionSource::MembrosDaCelula,
            result: Ok(vec![
                SelectOption::new("10", "Joana"),
                SelectOption::new("11", "Pedro"),
            ]),
        });
        for _ in 0..5 {
            page.handle_key(key(KeyCode::Tab));
        }
        page.handle_key(key(KeyCode::Right));
        page.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(page.form().choices("membros_presentes"), ["11".to_string()]);
    }

    #[test]
    fn test_restore_reenables_editing() {
        let mut page = FormPage::for_route(Route::NovaRede).unwrap();
        type_text(&mut page, "Casais");
        let PageAction::Submit(form) = page.handle_key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        )) else {
            panic!("expected submit");
        };
        page.restore(*form);
        type_text(&mut page, "!");
        assert_eq!(page.form().text("nome"), "Casais!");
    }
}
