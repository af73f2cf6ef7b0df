//! Write strategy: direct single write vs. chunked write
//!
//! The direct-write limit applies to raw content length; the codec's chunk
//! bound applies to compressed bytes. They default to the same constant but
//! are independent knobs.

use chainstash_codec::{ChunkSplitterConfig, MAX_CHUNK_SIZE};
use chainstash_refs::contains_references;
use serde::{Deserialize, Serialize};

/// Thresholds deciding how a write is laid out on the ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteStrategy {
    /// Largest raw content stored directly at the key's slot (exclusive:
    /// content of exactly this length is still direct)
    pub direct_limit: usize,
    /// Chunk bound applied to compressed bytes
    pub chunk: ChunkSplitterConfig,
}

impl Default for WriteStrategy {
    fn default() -> Self {
        Self {
            direct_limit: MAX_CHUNK_SIZE,
            chunk: ChunkSplitterConfig::default(),
        }
    }
}

impl WriteStrategy {
    /// True when content must be stored as chunks: it exceeds the direct
    /// limit, or it already reads as a serialized reference list (storing it
    /// directly would make readers chase references into foreign chunks).
    pub fn should_chunk(&self, content: &[u8]) -> bool {
        if content.len() > self.direct_limit {
            return true;
        }
        std::str::from_utf8(content)
            .map(contains_references)
            .unwrap_or(false)
    }
}
