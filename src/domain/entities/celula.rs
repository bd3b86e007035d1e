//! Cell group entity.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Weekday values accepted by the API, paired with their display label.
pub const DIAS_DA_SEMANA: &[(&str, &str)] = &[
    ("Domingo", "Domingo"),
    ("Segunda", "Segunda-feira"),
    ("Terca", "Terça-feira"),
    ("Quarta", "Quarta-feira"),
    ("Quinta", "Quinta-feira"),
    ("Sexta", "Sexta-feira"),
    ("Sabado", "Sábado"),
];

/// Returns the display label for a stored weekday value, or the value itself when unknown.
#[must_use]
pub fn dia_da_semana_label(value: &str) -> &str {
    DIAS_DA_SEMANA
        .iter()
        .find(|(key, _)| *key == value)
        .map_or(value, |(_, label)| label)
}

/// A cell group ("célula").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celula {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    pub lider: String,
    /// Identifier of the supervising person, as listed by `/supervisores`.
    #[serde(default)]
    pub supervisor: String,
    #[serde(default)]
    pub qtd_membros: u32,
    #[serde(default)]
    pub local: String,
    /// Name of the network ("rede") the cell belongs to.
    #[serde(default)]
    pub rede: String,
    #[serde(default)]
    pub dia_da_semana: String,
    /// Meeting time as `HH:MM`.
    #[serde(default)]
    pub horario: String,
}

impl Celula {
    /// Creates an unsaved cell with the given name and leader.
    #[must_use]
    pub fn new(nome: impl Into<String>, lider: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            lider: lider.into(),
            ..Self::default()
        }
    }

    /// Returns the weekday label for display.
    #[must_use]
    pub fn dia_da_semana_label(&self) -> &str {
        dia_da_semana_label(&self.dia_da_semana)
    }
}
