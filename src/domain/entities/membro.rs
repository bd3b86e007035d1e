//! Cell member entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::domain::serde_utils::api_date;

/// A member ("membro") of a cell group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membro {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub email: String,
    #[serde(with = "api_date")]
    pub data_nascimento: NaiveDate,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub batizado: bool,
}
