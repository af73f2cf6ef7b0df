#![warn(missing_docs)]

//! Chainstash transaction preparation: turns a (key, content) pair into the
//! ordered list of ledger calls that stores it
//!
//! Small content becomes one direct write at the key's slot. Large content is
//! compressed, split into content-addressed chunks, and written as one
//! metadata record (a reference list) plus one chunk-store call per chunk,
//! metadata always first in submission order.

pub mod call;
pub mod config;
pub mod error;
pub mod prepare;
pub mod strategy;
pub mod transaction;

pub use call::{CallDescriptor, CallValue, ContractAddress};
pub use config::{StorageContracts, PROTOCOL_VERSION};
pub use error::PrepareError;
pub use prepare::{prepare_chunked, prepare_direct, prepare_write};
pub use strategy::WriteStrategy;
pub use transaction::{PreparedTransaction, TxKind};
