//! Bible school entities: classes, their students and their lessons.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::domain::serde_utils::api_date;

/// A bible school class ("turma").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turma {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub periodo: String,
    #[serde(with = "api_date")]
    pub data_inicio: NaiveDate,
    #[serde(with = "api_date")]
    pub data_fim: NaiveDate,
}

/// A student ("aluno") enrolled in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aluno {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    #[serde(default)]
    pub telefone: String,
}

/// A lesson ("aula") given to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aula {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    #[serde(with = "api_date")]
    pub data: NaiveDate,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub qtd_presentes: u32,
}
