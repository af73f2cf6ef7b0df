//! Error types for the chainstash-prepare subsystem

use chainstash_codec::CodecError;

/// All errors that can occur while preparing ledger transactions
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// The codec failed while compressing content for chunking
    #[error("Codec failure during preparation: {0}")]
    Codec(#[from] CodecError),
}
