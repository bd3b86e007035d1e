use crate::domain::entities::Membro;
use crate::domain::validation::{FieldErrors, date, required_text};

use super::{FieldKind, FieldSpec, FormState};

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("nome", "Nome", FieldKind::Text),
    FieldSpec::new("telefone", "Telefone", FieldKind::Text),
    FieldSpec::new("email", "Email", FieldKind::Text),
    FieldSpec::new("data_nascimento", "Data de Nascimento", FieldKind::Date),
    FieldSpec::new("endereco", "Endereço", FieldKind::Text),
    FieldSpec::new("batizado", "Batizado", FieldKind::Flag),
];

pub(super) fn validate(form: &FormState, errors: &mut FieldErrors) -> Option<Membro> {
    let nome = errors.check(
        "nome",
        required_text(form.text("nome"), "Nome do membro é obrigatório"),
    );
    let telefone = errors.check(
        "telefone",
        required_text(form.text("telefone"), "Telefone do membro é obrigatório"),
    );
    let email = errors.check(
        "email",
        required_text(form.text("email"), "Email do membro é obrigatório"),
    );
    let data_nascimento = errors.check("data_nascimento", date(form.text("data_nascimento")));
    let endereco = errors.check(
        "endereco",
        required_text(form.text("endereco"), "Endereço do membro é obrigatório"),
    );

    Some(Membro {
        id: form.record_id(),
        nome: nome?,
        telefone: telefone?,
        email: email?,
        data_nascimento: data_nascimento?,
        endereco: endereco?,
        batizado: form.flag("batizado"),
    })
}

#[cfg(test)]
mod tests {
    use crate::application::forms::{FormKind, FormRecord, FormState};
    use crate::domain::entities::RecordId;

    #[test]
    fn test_every_text_field_is_required() {
        let mut form = FormState::new(FormKind::Membro {
            celula: RecordId(3),
        });
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.first_field(), Some("nome"));
        assert_eq!(errors.get("data_nascimento"), Some("Data é obrigatória"));
        assert_eq!(errors.get("batizado"), None);
    }

    #[test]
    fn test_valid_member() {
        let mut form = FormState::new(FormKind::Membro {
            celula: RecordId(3),
        });
        form.set_text("nome", "Maria");
        form.set_text("telefone", "(91) 99999-0000");
        form.set_text("email", "maria@example.com");
        form.set_text("data_nascimento", "1990-05-20");
        form.set_text("endereco", "Rua A, 10");
        form.toggle_flag("batizado");

        let Ok(FormRecord::Membro(membro)) = form.validate() else {
            panic!("expected a valid membro");
        };
        assert!(membro.batizado);
        assert_eq!(membro.data_nascimento.to_string(), "1990-05-20");
    }
}
