//! Ledger call descriptors: the fixed shape handed to the relay
//!
//! A descriptor names a contract, a write function, and an ordered argument
//! list. Arguments are a closed variant rather than free-form values so a
//! malformed call cannot be constructed after preparation.

use bytes::Bytes;
use chainstash_codec::ContentId;
use serde::{Deserialize, Serialize};

/// Address of a storage contract on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractAddress(pub String);

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One positional argument of a ledger call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallValue {
    /// A content or slot id
    Id(ContentId),
    /// Text payload (labels, metadata records)
    Text(String),
    /// Raw byte payload (chunk bodies, direct content)
    Bytes(Bytes),
}

/// A fully-specified ledger call: target contract, write function, arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    /// Contract the call targets
    pub target: ContractAddress,
    /// Name of the write function to invoke
    pub function: String,
    /// Ordered argument list
    pub args: Vec<CallValue>,
}
