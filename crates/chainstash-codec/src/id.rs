//! Content addressing: BLAKE3 ids for chunks and storage-key ledger slots

use serde::{Deserialize, Serialize};

/// A 32-byte BLAKE3 digest identifying a chunk's bytes or a storage key's
/// ledger slot. Rendered as 0x-prefixed lowercase hex on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub [u8; 32]);

impl ContentId {
    /// Id of a byte payload (a chunk's compressed bytes, or direct content).
    pub fn for_bytes(data: &[u8]) -> Self {
        ContentId(*blake3::hash(data).as_bytes())
    }

    /// Ledger slot id for a caller-chosen storage key. Deterministic: the
    /// same key always maps to the same slot.
    pub fn for_key(key: &str) -> Self {
        Self::for_bytes(key.as_bytes())
    }

    /// Return the digest as a lowercase hex string (no prefix)
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Return the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}
