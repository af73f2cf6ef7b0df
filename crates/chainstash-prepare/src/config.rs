//! Contract configuration for write preparation
//!
//! Passed explicitly into every preparation call; there is no process-wide
//! client or contract state.

use crate::call::ContractAddress;
use chainstash_codec::CompressionAlgorithm;
use serde::{Deserialize, Serialize};

/// Version written into every reference this build produces
pub const PROTOCOL_VERSION: &str = "0.0.1";

/// The contract pair a write targets plus the codec settings for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageContracts {
    /// Primary contract holding metadata records and direct content
    pub content_store: ContractAddress,
    /// Secondary contract holding chunk payloads
    pub chunk_store: ContractAddress,
    /// Write function on the content store
    pub content_write_fn: String,
    /// Write function on the chunk store
    pub chunk_write_fn: String,
    /// Operator namespace implied when a reference carries none
    pub default_operator: String,
    /// Compression applied before chunking
    pub compression: CompressionAlgorithm,
}

impl StorageContracts {
    /// Contract pair with conventional write function names.
    pub fn new(
        content_store: ContractAddress,
        chunk_store: ContractAddress,
        default_operator: impl Into<String>,
    ) -> Self {
        Self {
            content_store,
            chunk_store,
            content_write_fn: "setContent".to_string(),
            chunk_write_fn: "setChunk".to_string(),
            default_operator: default_operator.into(),
            compression: CompressionAlgorithm::default(),
        }
    }
}
