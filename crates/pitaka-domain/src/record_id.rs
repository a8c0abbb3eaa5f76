//! Record identifiers.
//!
//! Records created offline or imported from older data may carry arbitrary ids
//! (`"abc123"`, timestamps). The backend only accepts canonical UUIDs, so ids are
//! kept as strings and checked with [`RecordId::is_canonical`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant};

const CANONICAL_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for a hyphenated 8-4-4-4-12 UUID with version 1-5 and the RFC 4122 variant.
    pub fn is_canonical(&self) -> bool {
        if self.0.len() != CANONICAL_LEN {
            return false;
        }
        let Ok(uuid) = Uuid::try_parse(&self.0) else {
            return false;
        };
        matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
