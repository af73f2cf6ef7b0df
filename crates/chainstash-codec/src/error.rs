//! Error types for the chainstash-codec subsystem

/// All errors that can occur while encoding content for ledger storage
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Compression operation failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),
    /// Decompression operation failed
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),
}
