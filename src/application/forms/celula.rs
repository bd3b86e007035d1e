use crate::domain::entities::Celula;
use crate::domain::validation::{FieldErrors, count, required_text, time_of_day};

use super::{FieldKind, FieldSpec, FormState, OptionSource};

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("nome", "Nome do Grupo", FieldKind::Text),
    FieldSpec::new("rede", "Rede", FieldKind::Select(OptionSource::Redes)),
    FieldSpec::new("lider", "Líder", FieldKind::Text),
    FieldSpec::new(
        "supervisor",
        "Supervisor",
        FieldKind::Select(OptionSource::Supervisores),
    ),
    FieldSpec::new("local", "Local", FieldKind::Text),
    FieldSpec::new(
        "dia_da_semana",
        "Dia da Semana",
        FieldKind::Select(OptionSource::DiasDaSemana),
    ),
    FieldSpec::new("horario", "Horário", FieldKind::Time),
    FieldSpec::new("qtd_membros", "Quantidade de Membros", FieldKind::Count),
];

pub(super) fn defaults(form: &mut FormState) {
    form.put_text("qtd_membros", "0");
    form.put_text("dia_da_semana", "Sabado");
}

pub(super) fn fill(form: &mut FormState, celula: &Celula) {
    form.put_text("nome", &celula.nome);
    form.put_text("rede", &celula.rede);
    form.put_text("lider", &celula.lider);
    form.put_text("supervisor", &celula.supervisor);
    form.put_text("local", &celula.local);
    form.put_text("dia_da_semana", &celula.dia_da_semana);
    form.put_text("horario", &celula.horario);
    form.put_text("qtd_membros", celula.qtd_membros.to_string());
}

pub(super) fn validate(form: &FormState, errors: &mut FieldErrors) -> Option<Celula> {
    let nome = errors.check(
        "nome",
        required_text(form.text("nome"), "Nome do grupo é obrigatório"),
    );
    let rede = errors.check("rede", required_text(form.text("rede"), "Rede é obrigatória"));
    let lider = errors.check("lider", required_text(form.text("lider"), "Líder é obrigatório"));
    let supervisor = errors.check(
        "supervisor",
        required_text(form.text("supervisor"), "Supervisor é obrigatório"),
    );
    let local = errors.check("local", required_text(form.text("local"), "Local é obrigatório"));
    let dia_da_semana = errors.check(
        "dia_da_semana",
        required_text(form.text("dia_da_semana"), "Dia da semana é obrigatório"),
    );
    let horario = errors.check(
        "horario",
        time_of_day(form.text("horario"), "Horário é obrigatório"),
    );
    let qtd_membros = errors.check("qtd_membros", count(form.text("qtd_membros")));

    Some(Celula {
        id: form.record_id(),
        nome: nome?,
        lider: lider?,
        supervisor: supervisor?,
        qtd_membros: qtd_membros?,
        local: local?,
        rede: rede?,
        dia_da_semana: dia_da_semana?,
        horario: horario?.format("%H:%M").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::application::forms::{
        FormKind, FormRecord, FormState, OptionSource, OptionsState, SelectOption,
    };
    use crate::domain::entities::{Celula, RecordId};

    fn loaded_form() -> FormState {
        let mut form = FormState::new(FormKind::Celula);
        form.set_options(
            OptionSource::Supervisores,
            OptionsState::Ready(vec![SelectOption::new("1", "Pastor Rodolfo")]),
        );
        form.set_options(
            OptionSource::Redes,
            OptionsState::Ready(vec![SelectOption::new("Hope", "Hope")]),
        );
        form
    }

    #[test]
    fn test_empty_required_fields_are_reported() {
        let mut form = loaded_form();
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.get("nome"), Some("Nome do grupo é obrigatório"));
        assert_eq!(errors.get("lider"), Some("Líder é obrigatório"));
        assert_eq!(errors.get("rede"), Some("Rede é obrigatória"));
        assert_eq!(errors.get("local"), Some("Local é obrigatório"));
        assert_eq!(errors.get("horario"), Some("Horário é obrigatório"));
        assert_eq!(errors.get("supervisor"), None);
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_valid_form_produces_record() {
        let mut form = loaded_form();
        form.set_text("nome", " Hope 3 ");
        form.set_text("lider", "Ana");
        form.cycle_option("rede", true);
        form.set_text("local", "Tv. Jose Pio 157");
        form.set_text("horario", "17:00");
        form.set_text("qtd_membros", "12");

        let Ok(FormRecord::Celula(celula)) = form.validate() else {
            panic!("expected a valid célula");
        };
        assert_eq!(celula.id, RecordId::UNSAVED);
        assert_eq!(celula.nome, "Hope 3");
        assert_eq!(celula.rede, "Hope");
        assert_eq!(celula.supervisor, "1");
        assert_eq!(celula.dia_da_semana, "Sabado");
        assert_eq!(celula.horario, "17:00");
        assert_eq!(celula.qtd_membros, 12);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_submitted_payload_survives_server_echo() {
        let mut form = loaded_form();
        form.set_text("nome", "Hope 3");
        form.set_text("lider", "Ana");
        form.cycle_option("rede", true);
        form.set_text("local", "Tv. Jose Pio 157");
        form.set_text("horario", "17:00");
        form.set_text("qtd_membros", "12");
        let Ok(FormRecord::Celula(submitted)) = form.validate() else {
            panic!("expected a valid célula");
        };

        let mut payload = serde_json::to_value(&submitted).unwrap();
        assert_eq!(payload["qtd_membros"], 12);
        payload["ID"] = serde_json::json!(7);
        let fetched: Celula = serde_json::from_value(payload).unwrap();

        assert_eq!(fetched.id, RecordId(7));
        assert_eq!(fetched.nome, submitted.nome);
        assert_eq!(fetched.lider, submitted.lider);
        assert_eq!(fetched.supervisor, submitted.supervisor);
        assert_eq!(fetched.qtd_membros, submitted.qtd_membros);
        assert_eq!(fetched.local, submitted.local);
        assert_eq!(fetched.rede, submitted.rede);
        assert_eq!(fetched.dia_da_semana, submitted.dia_da_semana);
        assert_eq!(fetched.horario, submitted.horario);
    }

    #[test]
    fn test_negative_member_count_rejected() {
        let mut form = loaded_form();
        form.set_text("qtd_membros", "-3");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("qtd_membros"), Some("Não pode ser negativo"));
    }

    #[test]
    fn test_edit_mode_round_trips_record() {
        let celula = Celula {
            id: RecordId(7),
            nome: "Hope 3".to_string(),
            lider: "Ana".to_string(),
            supervisor: "1".to_string(),
            qtd_membros: 12,
            local: "Sala 2".to_string(),
            rede: "Hope".to_string(),
            dia_da_semana: "Quarta".to_string(),
            horario: "19:30".to_string(),
        };
        let mut form = FormState::edit_celula(&celula);
        form.set_options(OptionSource::Supervisores, OptionsState::Ready(Vec::new()));
        form.set_options(OptionSource::Redes, OptionsState::Ready(Vec::new()));

        assert_eq!(form.validate(), Ok(FormRecord::Celula(celula)));
    }
}
