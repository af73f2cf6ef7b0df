//! Reference records: chunk pointers with ordering and provenance attributes

use serde::{Deserialize, Serialize};

/// A pointer from a metadata record to one content-addressed chunk.
///
/// `hash` and `version` are always present on the wire; `index` orders the
/// chunk within its payload, `operator` names the namespace the chunk lives
/// under (resolved from context when absent), and `source` is a free-form
/// provenance tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Chunk id as written on the wire (0x-prefixed hex)
    pub hash: String,
    /// Protocol version the reference was written with
    pub version: String,
    /// Position of the chunk in its payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Owning operator namespace, lower-cased; absent means "use context"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Free-form provenance tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Reference {
    /// The operator this reference belongs to: its own operator if present,
    /// otherwise the supplied default. Always lower-cased.
    pub fn resolve_operator(&self, default_operator: &str) -> String {
        match &self.operator {
            Some(op) => op.to_lowercase(),
            None => default_operator.to_lowercase(),
        }
    }

    /// Deterministic composite key for de-duplication and lookup. Built from
    /// hash, version, index, and the *resolved* operator, so two references
    /// whose operators resolve to the same value collapse to one key while
    /// references at different indexes never do.
    pub fn dedup_key(&self, default_operator: &str) -> String {
        let index = self
            .index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{}|{}|{}|{}",
            self.hash,
            self.version,
            index,
            self.resolve_operator(default_operator)
        )
    }
}
