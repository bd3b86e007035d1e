//! Form schemas and editable form state.
//!
//! Each entity form is a static list of [`FieldSpec`]s plus a validator that turns the
//! raw input into the canonical record. [`FormState`] is the same for every form; only
//! the schema and the validator differ.

mod celula;
mod culto;
mod encontro;
mod membro;
mod rede;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::entities::{
    Celula, Culto, DIAS_DA_SEMANA, Encontro, Membro, RecordId, Rede, Supervisor,
};
use crate::domain::validation::FieldErrors;

/// Shown on a select whose options are still loading when the user submits.
pub const OPCOES_CARREGANDO: &str = "Aguarde o carregamento das opções";

/// Where a select or checklist gets its options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSource {
    Supervisores,
    Redes,
    MembrosDaCelula,
    DiasDaSemana,
}

impl OptionSource {
    /// Inline message shown in place of the options when loading fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Supervisores => {
                "Não foi possível carregar a lista de supervisores. Tente novamente mais tarde."
            }
            Self::Redes => "Não foi possível carregar a lista de redes. Tente novamente mais tarde.",
            Self::MembrosDaCelula => {
                "Não foi possível carregar a lista de membros. Tente novamente mais tarde."
            }
            Self::DiasDaSemana => "Opções indisponíveis.",
        }
    }

    /// Whether the options come from the API rather than a fixed list.
    #[must_use]
    pub const fn is_remote(self) -> bool {
        !matches!(self, Self::DiasDaSemana)
    }
}

/// One choice in a select or checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn from_supervisores(supervisores: &[Supervisor]) -> Vec<Self> {
        supervisores
            .iter()
            .map(|s| Self::new(s.id.to_string(), s.nome.clone()))
            .collect()
    }

    #[must_use]
    pub fn from_redes(redes: &[Rede]) -> Vec<Self> {
        redes
            .iter()
            .map(|r| Self::new(r.nome.clone(), r.display_label()))
            .collect()
    }

    #[must_use]
    pub fn from_membros(membros: &[Membro]) -> Vec<Self> {
        membros
            .iter()
            .map(|m| Self::new(m.id.to_string(), m.nome.clone()))
            .collect()
    }

    fn dias_da_semana() -> Vec<Self> {
        DIAS_DA_SEMANA
            .iter()
            .map(|(value, label)| Self::new(*value, *label))
            .collect()
    }
}

/// Loading state of one option source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsState {
    Loading,
    Ready(Vec<SelectOption>),
    Failed(String),
}

impl OptionsState {
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Ready(options) => options,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// How a field is edited and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Count,
    Amount,
    Date,
    Time,
    Select(OptionSource),
    Flag,
    Checklist(OptionSource),
}

impl FieldKind {
    #[must_use]
    pub const fn option_source(self) -> Option<OptionSource> {
        match self {
            Self::Select(source) | Self::Checklist(source) => Some(source),
            _ => None,
        }
    }

    /// Whether the field takes free typing.
    #[must_use]
    pub const fn is_typed(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Count | Self::Amount | Self::Date | Self::Time
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Raw value of one field as the user left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Flag(bool),
    Choices(Vec<String>),
}

impl FieldInput {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Flag => Self::Flag(false),
            FieldKind::Checklist(_) => Self::Choices(Vec::new()),
            _ => Self::Text(String::new()),
        }
    }
}

/// Which entity a form edits. Child records carry their parent célula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Celula,
    Culto,
    Encontro { celula: RecordId },
    Membro { celula: RecordId },
    Rede,
}

impl FormKind {
    #[must_use]
    pub const fn schema(self) -> &'static [FieldSpec] {
        match self {
            Self::Celula => celula::FIELDS,
            Self::Culto => culto::FIELDS,
            Self::Encontro { .. } => encontro::FIELDS,
            Self::Membro { .. } => membro::FIELDS,
            Self::Rede => rede::FIELDS,
        }
    }

    #[must_use]
    pub const fn title(self, editing: bool) -> &'static str {
        match (self, editing) {
            (Self::Celula, false) => "Nova Célula",
            (Self::Celula, true) => "Editar Célula",
            (Self::Culto, false) => "Novo Culto",
            (Self::Culto, true) => "Editar Culto",
            (Self::Encontro { .. }, false) => "Novo Encontro",
            (Self::Encontro { .. }, true) => "Editar Encontro",
            (Self::Membro { .. }, false) => "Novo Membro",
            (Self::Membro { .. }, true) => "Editar Membro",
            (Self::Rede, false) => "Nova Rede",
            (Self::Rede, true) => "Editar Rede",
        }
    }

    /// Option sources this form needs fetched from the API.
    #[must_use]
    pub fn remote_sources(self) -> Vec<OptionSource> {
        let mut sources: Vec<OptionSource> = Vec::new();
        for source in self
            .schema()
            .iter()
            .filter_map(|field| field.kind.option_source())
            .filter(|source| source.is_remote())
        {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}

/// Record produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRecord {
    Celula(Celula),
    Culto(Culto),
    Encontro(Encontro),
    Membro(Membro),
    Rede(Rede),
}

/// Editable state of one form.
#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    inputs: Vec<FieldInput>,
    errors: FieldErrors,
    edit_id: Option<RecordId>,
    options: HashMap<OptionSource, OptionsState>,
}

impl FormState {
    /// Blank form in create mode. Remote option sources start out loading.
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        let schema = kind.schema();
        let mut options = HashMap::new();
        for source in schema.iter().filter_map(|field| field.kind.option_source()) {
            let state = if source.is_remote() {
                OptionsState::Loading
            } else {
                OptionsState::Ready(SelectOption::dias_da_semana())
            };
            options.insert(source, state);
        }

        let mut form = Self {
            kind,
            inputs: schema.iter().map(|field| FieldInput::empty(field.kind)).collect(),
            errors: FieldErrors::new(),
            edit_id: None,
            options,
        };
        match kind {
            FormKind::Celula => celula::defaults(&mut form),
            FormKind::Culto => culto::defaults(&mut form),
            FormKind::Encontro { .. } => encontro::defaults(&mut form),
            FormKind::Membro { .. } | FormKind::Rede => {}
        }
        form
    }

    /// Form in edit mode, pre-filled from an existing célula.
    #[must_use]
    pub fn edit_celula(record: &Celula) -> Self {
        let mut form = Self::new(FormKind::Celula);
        form.edit_id = Some(record.id);
        celula::fill(&mut form, record);
        form
    }

    /// Form in edit mode, pre-filled from an existing culto.
    #[must_use]
    pub fn edit_culto(record: &Culto) -> Self {
        let mut form = Self::new(FormKind::Culto);
        form.edit_id = Some(record.id);
        culto::fill(&mut form, record);
        form
    }

    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub fn schema(&self) -> &'static [FieldSpec] {
        self.kind.schema()
    }

    #[must_use]
    pub const fn is_edit_mode(&self) -> bool {
        self.edit_id.is_some()
    }

    #[must_use]
    pub const fn edit_id(&self) -> Option<RecordId> {
        self.edit_id
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.kind.title(self.is_edit_mode())
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_edit_mode() { "Atualizar" } else { "Salvar" }
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.schema().iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<&FieldInput> {
        self.index_of(name).and_then(|index| self.inputs.get(index))
    }

    /// Text content of a field; empty for flags, checklists and unknown names.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        match self.input(name) {
            Some(FieldInput::Text(value)) => value,
            _ => "",
        }
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.input(name), Some(FieldInput::Flag(true)))
    }

    #[must_use]
    pub fn choices(&self, name: &str) -> &[String] {
        match self.input(name) {
            Some(FieldInput::Choices(values)) => values,
            _ => &[],
        }
    }

    /// Whether the user may change the field right now.
    #[must_use]
    pub fn can_change(&self, name: &str) -> bool {
        let Some(field) = self.schema().iter().find(|field| field.name == name) else {
            return false;
        };
        field
            .kind
            .option_source()
            .is_none_or(|source| matches!(self.options(source), OptionsState::Ready(_)))
    }

    /// Replaces a text field's content.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        if !self.can_change(name) {
            return;
        }
        if let Some(FieldInput::Text(current)) = self
            .index_of(name)
            .and_then(|index| self.inputs.get_mut(index))
        {
            *current = value.into();
        }
    }

    pub fn toggle_flag(&mut self, name: &str) {
        if let Some(FieldInput::Flag(current)) = self
            .index_of(name)
            .and_then(|index| self.inputs.get_mut(index))
        {
            *current = !*current;
        }
    }

    /// Adds or removes one value of a checklist.
    pub fn toggle_choice(&mut self, name: &str, value: &str) {
        if !self.can_change(name) {
            return;
        }
        if let Some(FieldInput::Choices(values)) = self
            .index_of(name)
            .and_then(|index| self.inputs.get_mut(index))
        {
            if let Some(position) = values.iter().position(|v| v == value) {
                values.remove(position);
            } else {
                values.push(value.to_string());
            }
        }
    }

    /// Moves a select to the next (or previous) option, wrapping around.
    pub fn cycle_option(&mut self, name: &str, forward: bool) {
        let Some(source) = self
            .schema()
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| match field.kind {
                FieldKind::Select(source) => Some(source),
                _ => None,
            })
        else {
            return;
        };
        let options = self.options(source).options();
        if options.is_empty() {
            return;
        }

        let current = options.iter().position(|o| o.value == self.text(name));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(index), true) => (index + 1) % options.len(),
            (Some(index), false) => (index + options.len() - 1) % options.len(),
        };
        let value = options[next].value.clone();
        self.set_text(name, value);
    }

    #[must_use]
    pub fn options(&self, source: OptionSource) -> &OptionsState {
        static LOADING: OptionsState = OptionsState::Loading;
        self.options.get(&source).unwrap_or(&LOADING)
    }

    /// Stores fetched options. In create mode the célula form preselects the first
    /// supervisor once they arrive.
    pub fn set_options(&mut self, source: OptionSource, state: OptionsState) {
        debug!(?source, loaded = !state.is_loading(), "Form options updated");
        let first = state.options().first().map(|o| o.value.clone());
        self.options.insert(source, state);

        if source == OptionSource::Supervisores && !self.is_edit_mode() {
            if let Some(first) = first {
                if self.text("supervisor").is_empty() {
                    self.set_text("supervisor", first);
                }
            }
        }
    }

    /// Whether any option source of this form is still loading.
    #[must_use]
    pub fn is_loading_options(&self) -> bool {
        self.options.values().any(OptionsState::is_loading)
    }

    /// Label of the currently selected option, falling back to the raw value.
    #[must_use]
    pub fn selected_label(&self, name: &str) -> String {
        let value = self.text(name);
        self.schema()
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.kind.option_source())
            .and_then(|source| {
                self.options(source)
                    .options()
                    .iter()
                    .find(|o| o.value == value)
                    .map(|o| o.label.clone())
            })
            .unwrap_or_else(|| value.to_string())
    }

    /// Runs every field rule. On success the errors are cleared and the typed record
    /// returned; on failure the complete error map replaces the previous one.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn validate(&mut self) -> Result<FormRecord, FieldErrors> {
        let mut errors = FieldErrors::new();

        let record = match self.kind {
            FormKind::Celula => celula::validate(self, &mut errors).map(FormRecord::Celula),
            FormKind::Culto => culto::validate(self, &mut errors).map(FormRecord::Culto),
            FormKind::Encontro { celula } => {
                encontro::validate(self, celula, &mut errors).map(FormRecord::Encontro)
            }
            FormKind::Membro { .. } => membro::validate(self, &mut errors).map(FormRecord::Membro),
            FormKind::Rede => rede::validate(self, &mut errors).map(FormRecord::Rede),
        };

        for field in self.schema() {
            if let FieldKind::Select(source) | FieldKind::Checklist(source) = field.kind {
                if self.options(source).is_loading() {
                    errors.insert(field.name, OPCOES_CARREGANDO);
                }
            }
        }

        match record {
            Some(record) if errors.is_empty() => {
                self.errors.clear();
                Ok(record)
            }
            _ => {
                debug!(kind = ?self.kind, invalid = errors.len(), "Form validation failed");
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    fn record_id(&self) -> RecordId {
        self.edit_id.unwrap_or(RecordId::UNSAVED)
    }

    fn put_text(&mut self, name: &str, value: impl Into<String>) {
        if let Some(FieldInput::Text(current)) = self
            .index_of(name)
            .and_then(|index| self.inputs.get_mut(index))
        {
            *current = value.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_options_start_loading() {
        let form = FormState::new(FormKind::Celula);
        assert!(form.options(OptionSource::Supervisores).is_loading());
        assert!(form.options(OptionSource::Redes).is_loading());
        assert_eq!(form.options(OptionSource::DiasDaSemana).options().len(), 7);
        assert!(!form.can_change("supervisor"));
        assert!(form.can_change("nome"));
    }

    #[test]
    fn test_loading_select_blocks_submission() {
        let mut form = FormState::new(FormKind::Celula);
        form.set_text("nome", "Hope 3");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("supervisor"), Some(OPCOES_CARREGANDO));
        assert_eq!(errors.get("rede"), Some(OPCOES_CARREGANDO));
    }

    #[test]
    fn test_first_supervisor_preselected_in_create_mode() {
        let mut form = FormState::new(FormKind::Celula);
        form.set_options(
            OptionSource::Supervisores,
            OptionsState::Ready(vec![
                SelectOption::new("1", "Pastor Rodolfo"),
                SelectOption::new("2", "Pastor Marcos"),
            ]),
        );
        assert_eq!(form.text("supervisor"), "1");
        assert_eq!(form.selected_label("supervisor"), "Pastor Rodolfo");
    }

    #[test]
    fn test_edit_mode_keeps_existing_supervisor() {
        let mut celula = Celula::new("Hope 3", "Ana");
        celula.id = RecordId(7);
        celula.supervisor = "2".to_string();
        let mut form = FormState::edit_celula(&celula);
        form.set_options(
            OptionSource::Supervisores,
            OptionsState::Ready(vec![
                SelectOption::new("1", "Pastor Rodolfo"),
                SelectOption::new("2", "Pastor Marcos"),
            ]),
        );
        assert_eq!(form.text("supervisor"), "2");
        assert_eq!(form.title(), "Editar Célula");
        assert_eq!(form.submit_label(), "Atualizar");
    }

    #[test]
    fn test_cycle_option_wraps() {
        let mut form = FormState::new(FormKind::Celula);
        form.set_text("dia_da_semana", "Sabado");
        form.cycle_option("dia_da_semana", true);
        assert_eq!(form.text("dia_da_semana"), "Domingo");
        form.cycle_option("dia_da_semana", false);
        assert_eq!(form.text("dia_da_semana"), "Sabado");
    }

    #[test]
    fn test_failed_options_keep_control_locked() {
        let mut form = FormState::new(FormKind::Encontro {
            celula: RecordId(3),
        });
        form.set_options(
            OptionSource::MembrosDaCelula,
            OptionsState::Failed(OptionSource::MembrosDaCelula.failure_message().to_string()),
        );
        form.toggle_choice("membros_presentes", "1");
        assert!(form.choices("membros_presentes").is_empty());
        assert!(!form.is_loading_options());
    }

    #[test]
    fn test_remote_sources_are_deduplicated() {
        assert_eq!(
            FormKind::Celula.remote_sources(),
            vec![OptionSource::Redes, OptionSource::Supervisores]
        );
        assert!(FormKind::Culto.remote_sources().is_empty());
    }
}
