use chrono::Local;

use crate::domain::entities::Culto;
use crate::domain::validation::{FieldErrors, count, date, required_text};

use super::{FieldKind, FieldSpec, FormState};

const QUANTIDADES: [&str; 6] = [
    "qtd_jovens",
    "qtd_adultos",
    "qtd_criancas",
    "qtd_visitantes",
    "qtd_batismo",
    "qtd_conversao",
];

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("nome", "Nome do Culto", FieldKind::Text),
    FieldSpec::new("data", "Data", FieldKind::Date),
    FieldSpec::new("pastor", "Pastor", FieldKind::Text),
    FieldSpec::new("qtd_jovens", "Quantidade de Jovens", FieldKind::Count),
    FieldSpec::new("qtd_adultos", "Quantidade de Adultos", FieldKind::Count),
    FieldSpec::new("qtd_criancas", "Quantidade de Crianças", FieldKind::Count),
    FieldSpec::new("qtd_visitantes", "Quantidade de Visitantes", FieldKind::Count),
    FieldSpec::new("qtd_batismo", "Quantidade de Batismos", FieldKind::Count),
    FieldSpec::new("qtd_conversao", "Quantidade de Conversões", FieldKind::Count),
];

pub(super) fn defaults(form: &mut FormState) {
    form.put_text("data", Local::now().date_naive().format("%d/%m/%Y").to_string());
    for name in QUANTIDADES {
        form.put_text(name, "0");
    }
}

pub(super) fn fill(form: &mut FormState, culto: &Culto) {
    form.put_text("nome", &culto.nome);
    form.put_text("data", culto.data.format("%d/%m/%Y").to_string());
    form.put_text("pastor", &culto.pastor);
    let values = [
        culto.qtd_jovens,
        culto.qtd_adultos,
        culto.qtd_criancas,
        culto.qtd_visitantes,
        culto.qtd_batismo,
        culto.qtd_conversao,
    ];
    for (name, value) in QUANTIDADES.into_iter().zip(values) {
        form.put_text(name, value.to_string());
    }
}

pub(super) fn validate(form: &FormState, errors: &mut FieldErrors) -> Option<Culto> {
    let nome = errors.check(
        "nome",
        required_text(form.text("nome"), "Nome do culto é obrigatório"),
    );
    let data = errors.check("data", date(form.text("data")));
    let pastor = errors.check("pastor", required_text(form.text("pastor"), "Pastor é obrigatório"));
    let [jovens, adultos, criancas, visitantes, batismo, conversao] =
        QUANTIDADES.map(|name| errors.check(name, count(form.text(name))));

    Some(Culto {
        id: form.record_id(),
        nome: nome?,
        data: data?,
        pastor: pastor?,
        qtd_jovens: jovens?,
        qtd_adultos: adultos?,
        qtd_criancas: criancas?,
        qtd_visitantes: visitantes?,
        qtd_batismo: batismo?,
        qtd_conversao: conversao?,
    })
}
