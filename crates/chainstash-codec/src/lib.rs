#![warn(missing_docs)]

//! Chainstash codec: compression, bounded chunk splitting, BLAKE3 content addressing
//!
//! Write path: Content → Compress (LZ4/Zstd) → Split (≤ 20,000-byte chunks) → content-addressed chunks
//! Read path:  Chunks in index order → Concatenate → Decompress → Content

pub mod assemble;
pub mod chunk;
pub mod compression;
pub mod error;
pub mod id;

pub use assemble::assemble;
pub use chunk::{estimate_chunk_count, Chunk, ChunkSplitter, ChunkSplitterConfig, MAX_CHUNK_SIZE};
pub use compression::{compress, decompress, is_compressible, CompressionAlgorithm};
pub use error::CodecError;
pub use id::ContentId;
