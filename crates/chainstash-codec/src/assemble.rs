//! Read-path reassembly: concatenate chunks in index order and decompress
//!
//! Reassembly failure is an absence, not an error: a corrupted, misordered,
//! or incomplete chunk set yields `None` and the reader reports the content
//! as unavailable. Chunks referenced by on-ledger metadata may simply not be
//! visible yet, so the caller treats `None` as retryable.

use crate::chunk::Chunk;
use crate::compression::{decompress, CompressionAlgorithm};
use tracing::debug;

/// Concatenate chunk bytes in the given order and decompress. Returns `None`
/// for an empty chunk list or when decompression fails.
pub fn assemble(chunks: &[Chunk], algo: CompressionAlgorithm) -> Option<Vec<u8>> {
    if chunks.is_empty() {
        return None;
    }
    let total: usize = chunks.iter().map(|c| c.data.len()).sum();
    let mut payload = Vec::with_capacity(total);
    for chunk in chunks {
        payload.extend_from_slice(&chunk.data);
    }
    match decompress(&payload, algo) {
        Ok(content) => {
            debug!(
                chunk_count = chunks.len(),
                payload_bytes = payload.len(),
                content_bytes = content.len(),
                "Assembled content from chunks"
            );
            Some(content)
        }
        Err(e) => {
            debug!(chunk_count = chunks.len(), error = %e, "Chunk reassembly failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{ChunkSplitter, ChunkSplitterConfig};
    use crate::compression::compress;
    use proptest::prelude::*;

    fn roundtrip(content: &[u8], algo: CompressionAlgorithm) -> Option<Vec<u8>> {
        let compressed = compress(content, algo).unwrap();
        let chunks = ChunkSplitter::default().split(&compressed);
        assemble(&chunks, algo)
    }

    #[test]
    fn roundtrip_small_and_large() {
        for content in [
            Vec::new(),
            b"short".to_vec(),
            (0..35_000u32).flat_map(|i| i.to_le_bytes()).collect::<Vec<u8>>(),
        ] {
            assert_eq!(roundtrip(&content, CompressionAlgorithm::Lz4).unwrap(), content);
        }
    }

    #[test]
    fn empty_chunk_list_is_no_result() {
        assert_eq!(assemble(&[], CompressionAlgorithm::Lz4), None);
    }

    #[test]
    fn misordered_chunks_are_no_result() {
        // Incompressible payload so it spans multiple chunks even compressed.
        let content: Vec<u8> = (0..60_000u64)
            .flat_map(|i| i.wrapping_mul(0x9E3779B97F4A7C15).to_le_bytes())
            .collect();
        let compressed = compress(&content, CompressionAlgorithm::Lz4).unwrap();
        let mut chunks = ChunkSplitter::new(ChunkSplitterConfig { max_chunk_size: 10_000 })
            .split(&compressed);
        assert!(chunks.len() >= 2);
        chunks.reverse();
        assert_eq!(assemble(&chunks, CompressionAlgorithm::Lz4), None);
    }

    #[test]
    fn corrupted_chunk_is_no_result() {
        let content = b"some content that will be stored on the ledger".repeat(100);
        let compressed = compress(&content, CompressionAlgorithm::Lz4).unwrap();
        let mut chunks = ChunkSplitter::default().split(&compressed);
        let mut broken: Vec<u8> = chunks[0].data.to_vec();
        for b in broken.iter_mut().skip(4) {
            *b = !*b;
        }
        chunks[0].data = broken.into();
        assert_eq!(assemble(&chunks, CompressionAlgorithm::Lz4), None);
    }

    proptest! {
        #[test]
        fn prop_roundtrip_lz4(content in prop::collection::vec(0u8..=255, 0..40_000)) {
            prop_assert_eq!(roundtrip(&content, CompressionAlgorithm::Lz4).unwrap(), content);
        }
        #[test]
        fn prop_roundtrip_zstd(content in prop::collection::vec(0u8..=255, 0..40_000)) {
            let algo = CompressionAlgorithm::Zstd { level: 3 };
            prop_assert_eq!(roundtrip(&content, algo).unwrap(), content);
        }
    }
}
