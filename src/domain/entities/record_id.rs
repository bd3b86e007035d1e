//! Identifier shared by every record served by the gestão API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier. `0` marks a record that has not been persisted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Identifier used for records that only exist in a form.
    pub const UNSAVED: Self = Self(0);

    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns whether the server has assigned this id.
    #[must_use]
    pub const fn is_saved(self) -> bool {
        self.0 != 0
    }
}

/// What the API answers after a create or update. Only the id is read from the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SavedRecord {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: RecordId,
}

impl SavedRecord {
    #[must_use]
    pub const fn new(id: RecordId) -> Self {
        Self { id }
    }

    /// Acknowledgement of a write whose body carried no usable id.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            id: RecordId::UNSAVED,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        crate::domain::serde_utils::lenient_id::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::domain::serde_utils::lenient_id::deserialize(deserializer).map(Self)
    }
}
