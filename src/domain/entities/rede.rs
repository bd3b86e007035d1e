//! Network entity.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A network ("rede") grouping several cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rede {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
    pub nome: String,
    #[serde(default)]
    pub label: String,
}

impl Rede {
    /// Creates an unsaved network whose label mirrors its name.
    #[must_use]
    pub fn new(nome: impl Into<String>) -> Self {
        let nome = nome.into();
        Self {
            id: RecordId::UNSAVED,
            label: nome.clone(),
            nome,
        }
    }

    /// Returns the label, falling back to the name when the server left it blank.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.nome
        } else {
            &self.label
        }
    }
}
