//! Student record
//!
//! The only entity the service stores. The JSON form is both the HTTP
//! representation and the persisted value.

use serde::{Deserialize, Serialize};

/// A student record, keyed by `id`.
///
/// Missing fields decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Server-assigned decimal id, the store key
    pub id: String,
    pub name: String,
    pub age: i64,
    pub grade: String,
}

impl Student {
    /// Encodes the full record, id included, as stored bytes.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decodes a stored record.
    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
