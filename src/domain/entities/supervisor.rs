//! Supervisor entity.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A person overseeing one or more cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supervisor {
    #[serde(alias = "ID")]
    pub id: RecordId,
    pub nome: String,
}

impl Supervisor {
    /// Creates a supervisor.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, nome: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nome: nome.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_string_id() {
        let supervisor: Supervisor =
            serde_json::from_str(r#"{"id": "2", "nome": "Pastor Marcos"}"#).unwrap();
        assert_eq!(supervisor, Supervisor::new(2, "Pastor Marcos"));
    }
}
