use serde::Deserialize;

/// Error body returned by the gestão API.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Server-provided explanation, preferring `message` over `error`.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
