//! Bounded, order-preserving chunk splitting over compressed bytes
//!
//! The ledger contract rejects writes above a fixed byte bound, so compressed
//! payloads are split into sequential chunks of at most `max_chunk_size`
//! bytes. Boundaries are positional, not content-defined: a reader must be
//! able to reconstruct the payload from index order alone.

use crate::compression::{compress, CompressionAlgorithm};
use crate::id::ContentId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest chunk the ledger contract accepts, in bytes (decimal bound, not a
/// power of two).
pub const MAX_CHUNK_SIZE: usize = 20_000;

/// A size-bounded, content-addressed piece of a compressed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk content (compressed bytes)
    pub data: Bytes,
    /// BLAKE3 id of this chunk's own bytes
    pub id: ContentId,
    /// Position of this chunk in the payload (0-based)
    pub index: usize,
}

/// Configuration for the chunk splitter
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkSplitterConfig {
    /// Maximum chunk size in bytes
    pub max_chunk_size: usize,
}

impl Default for ChunkSplitterConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: MAX_CHUNK_SIZE,
        }
    }
}

/// Splits compressed payloads into bounded, order-preserving chunks
pub struct ChunkSplitter {
    config: ChunkSplitterConfig,
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self::new(ChunkSplitterConfig::default())
    }
}

impl ChunkSplitter {
    /// Create a splitter with the given configuration
    pub fn new(config: ChunkSplitterConfig) -> Self {
        Self { config }
    }

    /// Split data into sequential chunks of at most `max_chunk_size` bytes
    /// and compute the BLAKE3 id per chunk. Empty input still yields one
    /// (empty) chunk, so every payload has at least one addressable piece.
    /// Concatenating all chunk bytes in index order reconstructs the input.
    pub fn split(&self, data: &[u8]) -> Vec<Chunk> {
        if data.is_empty() {
            return vec![Chunk {
                data: Bytes::new(),
                id: ContentId::for_bytes(&[]),
                index: 0,
            }];
        }
        let chunks: Vec<Chunk> = data
            .chunks(self.config.max_chunk_size)
            .enumerate()
            .map(|(index, piece)| {
                let data = Bytes::copy_from_slice(piece);
                Chunk {
                    id: ContentId::for_bytes(&data),
                    data,
                    index,
                }
            })
            .collect();
        debug!(
            payload_bytes = data.len(),
            max_chunk_size = self.config.max_chunk_size,
            chunk_count = chunks.len(),
            "Split payload into chunks"
        );
        chunks
    }
}

/// Cheap approximation of the chunk count `split(compress(content))` would
/// produce, without running the full pipeline. Compresses a prefix sample and
/// extrapolates the compressed size, then divides by the chunk bound.
/// Always at least 1.
pub fn estimate_chunk_count(
    content: &[u8],
    algo: CompressionAlgorithm,
    max_chunk_size: usize,
) -> usize {
    if content.is_empty() || max_chunk_size == 0 {
        return 1;
    }
    let estimated_compressed = match algo {
        CompressionAlgorithm::None => content.len(),
        _ => {
            let sample = &content[..content.len().min(4096)];
            let compressed_sample = compress(sample, algo)
                .map(|c| c.len())
                .unwrap_or(sample.len());
            let ratio = compressed_sample as f64 / sample.len() as f64;
            (content.len() as f64 * ratio).ceil() as usize
        }
    };
    estimated_compressed.div_ceil(max_chunk_size).max(1)
}
