use chrono::Local;
use rust_decimal::Decimal;

use crate::domain::entities::{Encontro, RecordId};
use crate::domain::validation::{FieldErrors, amount, count, date, required_text};

use super::{FieldKind, FieldSpec, FormState, OptionSource};

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("data", "Data", FieldKind::Date),
    FieldSpec::new("pregador", "Pregador", FieldKind::Text),
    FieldSpec::new("qtd_presentes", "Quantidade de Presentes", FieldKind::Count),
    FieldSpec::new("qtd_visitantes", "Quantidade de Visitantes", FieldKind::Count),
    FieldSpec::new("oferta_arrecadada", "Oferta Arrecadada", FieldKind::Amount),
    FieldSpec::new(
        "membros_presentes",
        "Membros Presentes",
        FieldKind::Checklist(OptionSource::MembrosDaCelula),
    ),
];

pub(super) fn defaults(form: &mut FormState) {
    form.put_text("data", Local::now().date_naive().format("%d/%m/%Y").to_string());
    form.put_text("qtd_presentes", "0");
    form.put_text("qtd_visitantes", "0");
    form.put_text("oferta_arrecadada", Decimal::ZERO.to_string());
}

pub(super) fn validate(
    form: &FormState,
    celula: RecordId,
    errors: &mut FieldErrors,
) -> Option<Encontro> {
    let data = errors.check("data", date(form.text("data")));
    let pregador = errors.check(
        "pregador",
        required_text(form.text("pregador"), "Pregador é obrigatório"),
    );
    let qtd_presentes = errors.check("qtd_presentes", count(form.text("qtd_presentes")));
    let qtd_visitantes = errors.check("qtd_visitantes", count(form.text("qtd_visitantes")));
    let oferta_arrecadada = errors.check(
        "oferta_arrecadada",
        amount(form.text("oferta_arrecadada")),
    );
    let membros_presentes = form
        .choices("membros_presentes")
        .iter()
        .filter_map(|value| value.parse::<u64>().ok())
        .collect();

    Some(Encontro {
        id: form.record_id(),
        id_celula: celula,
        data: data?,
        pregador: pregador?,
        qtd_presentes: qtd_presentes?,
        qtd_visitantes: qtd_visitantes?,
        oferta_arrecadada: oferta_arrecadada?,
        membros_presentes,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::application::forms::{
        FormKind, FormRecord, FormState, OptionSource, OptionsState, SelectOption,
    };
    use crate::domain::entities::{Encontro, RecordId};

    fn loaded_form() -> FormState {
        let mut form = FormState::new(FormKind::Encontro {
            celula: RecordId(3),
        });
        form.set_options(
            OptionSource::MembrosDaCelula,
            OptionsState::Ready(vec![
                SelectOption::new("1", "Ana"),
                SelectOption::new("2", "Bruno"),
            ]),
        );
        form
    }

    #[test]
    fn test_offering_accepts_decimals_but_counts_do_not() {
        let mut form = loaded_form();
        form.set_text("pregador", "Pastor 1");
        form.set_text("data", "09/03/2024");
        form.set_text("oferta_arrecadada", "100,50");
        form.set_text("qtd_presentes", "10");
        form.toggle_choice("membros_presentes", "2");
        form.toggle_choice("membros_presentes", "1");
        form.toggle_choice("membros_presentes", "2");

        let Ok(FormRecord::Encontro(encontro)) = form.validate() else {
            panic!("expected a valid encontro");
        };
        assert_eq!(encontro.id_celula, RecordId(3));
        assert_eq!(encontro.data, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(encontro.oferta_arrecadada, Decimal::new(10050, 2));
        assert_eq!(encontro.membros_presentes, vec![1]);

        form.set_text("qtd_visitantes", "2.5");
        form.set_text("oferta_arrecadada", "-1");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("qtd_visitantes"), Some("Deve ser um número inteiro"));
        assert_eq!(errors.get("oferta_arrecadada"), Some("Não pode ser negativo"));
    }

    #[test]
    fn test_submitted_payload_survives_server_echo() {
        let mut form = loaded_form();
        form.set_text("pregador", "Pastor 1");
        form.set_text("data", "2024-03-09");
        form.set_text("oferta_arrecadada", "100,5");
        form.set_text("qtd_presentes", "10");
        form.set_text("qtd_visitantes", "2");
        form.toggle_choice("membros_presentes", "1");
        let Ok(FormRecord::Encontro(submitted)) = form.validate() else {
            panic!("expected a valid encontro");
        };

        let mut payload = serde_json::to_value(&submitted).unwrap();
        assert_eq!(payload["data"], "2024-03-09T00:00:00Z");
        assert_eq!(payload["oferta_arrecadada"].as_f64(), Some(100.5));
        payload["ID"] = serde_json::json!(4);
        let fetched: Encontro = serde_json::from_value(payload).unwrap();

        assert_eq!(fetched.id, RecordId(4));
        assert_eq!(fetched.id_celula, RecordId(3));
        assert_eq!(fetched.data, submitted.data);
        assert_eq!(fetched.pregador, submitted.pregador);
        assert_eq!(fetched.qtd_presentes, 10);
        assert_eq!(fetched.qtd_visitantes, 2);
        assert_eq!(fetched.oferta_arrecadada, Decimal::new(1005, 1));
        assert_eq!(fetched.membros_presentes, vec![1]);
    }

    #[test]
    fn test_missing_preacher_and_date() {
        let mut form = loaded_form();
        form.set_text("data", "");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("data"), Some("Data é obrigatória"));
        assert_eq!(errors.get("pregador"), Some("Pregador é obrigatório"));
    }
}
