//! Cell meeting entity.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::domain::serde_utils::{api_date, lenient_id};

/// A single meeting ("encontro") of a cell group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encontro {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    #[serde(default)]
    pub id_celula: RecordId,
    #[serde(with = "api_date")]
    pub data: NaiveDate,
    pub pregador: String,
    #[serde(default)]
    pub qtd_presentes: u32,
    #[serde(default)]
    pub qtd_visitantes: u32,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub oferta_arrecadada: Decimal,
    /// Ids of the cell members marked as present.
    #[serde(with = "lenient_id::vec", default)]
    pub membros_presentes: Vec<u64>,
}

impl Encontro {
    /// Returns whether the member was marked present.
    #[must_use]
    pub fn is_present(&self, membro: RecordId) -> bool {
        self.membros_presentes.contains(&membro.as_u64())
    }
}
