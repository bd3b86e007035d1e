use crate::domain::entities::Rede;
use crate::domain::validation::{FieldErrors, required_text};

use super::{FieldKind, FieldSpec, FormState};

pub(super) const FIELDS: &[FieldSpec] = &[FieldSpec::new("nome", "Nome", FieldKind::Text)];

pub(super) fn validate(form: &FormState, errors: &mut FieldErrors) -> Option<Rede> {
    let nome = errors.check("nome", required_text(form.text("nome"), "Nome é obrigatório"))?;
    let mut rede = Rede::new(nome);
    rede.id = form.record_id();
    Some(rede)
}
