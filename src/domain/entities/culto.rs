//! Worship service entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::domain::serde_utils::api_date;

/// A worship service ("culto") with its attendance counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culto {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    #[serde(with = "api_date")]
    pub data: NaiveDate,
    pub pastor: String,
    #[serde(default)]
    pub qtd_jovens: u32,
    #[serde(default)]
    pub qtd_adultos: u32,
    #[serde(default)]
    pub qtd_criancas: u32,
    #[serde(default)]
    pub qtd_visitantes: u32,
    #[serde(default)]
    pub qtd_batismo: u32,
    #[serde(default)]
    pub qtd_conversao: u32,
}

impl Culto {
    /// Total headcount: young people, adults, children and visitors.
    #[must_use]
    pub fn total_presentes(&self) -> u32 {
        self.qtd_jovens
            .saturating_add(self.qtd_adultos)
            .saturating_add(self.qtd_criancas)
            .saturating_add(self.qtd_visitantes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_presentes() {
        let culto: Culto = serde_json::from_str(
            r#"{"ID": 1, "nome": "Culto 1", "data": "2024-01-01", "pastor": "Pastor 1",
                "qtd_jovens": 10, "qtd_adultos": 20, "qtd_criancas": 30, "qtd_visitantes": 60,
                "qtd_batismo": 10, "qtd_conversao": 5}"#,
        )
        .unwrap();
        assert_eq!(culto.total_presentes(), 120);
    }
}
