//! LZ4 and Zstd compression/decompression for ledger payloads
//!
//! The transform must be deterministic: identical input bytes always yield
//! identical output bytes, so chunk ids derived from compressed bytes are
//! stable across preparation runs.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Compression algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompressionAlgorithm {
    /// No compression (passthrough)
    None,
    /// LZ4 with prepended size — fast default for write preparation
    #[default]
    Lz4,
    /// Zstandard — higher ratio for large payloads where ledger bytes are expensive
    Zstd {
        /// Compression level (1=fastest, 19=best ratio, 3=balanced default)
        level: i32,
    },
}

/// Compress content before it is split for the ledger.
pub fn compress(data: &[u8], algo: CompressionAlgorithm) -> Result<Vec<u8>, CodecError> {
    match algo {
        CompressionAlgorithm::None => Ok(data.to_vec()),
        CompressionAlgorithm::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
        CompressionAlgorithm::Zstd { level } => {
            zstd::encode_all(data, level).map_err(|e| CodecError::CompressionFailed(e.to_string()))
        }
    }
}

/// Decompress a reassembled payload. The caller supplies the same algorithm
/// the writer recorded; a mismatch surfaces as a decompression error.
pub fn decompress(data: &[u8], algo: CompressionAlgorithm) -> Result<Vec<u8>, CodecError> {
    match algo {
        CompressionAlgorithm::None => Ok(data.to_vec()),
        CompressionAlgorithm::Lz4 => lz4_flex::decompress_size_prepended(data)
            .map_err(|e| CodecError::DecompressionFailed(e.to_string())),
        CompressionAlgorithm::Zstd { .. } => {
            zstd::decode_all(data).map_err(|e| CodecError::DecompressionFailed(e.to_string()))
        }
    }
}

/// Whether spending cycles on compression is likely to save ledger bytes.
/// High-entropy content (already compressed, encrypted, random) compresses
/// its prefix sample poorly and reports false.
pub fn is_compressible(data: &[u8]) -> bool {
    if data.len() < 64 {
        return true;
    }
    let sample = &data[..data.len().min(1024)];
    let compressed = lz4_flex::compress_prepend_size(sample);
    (compressed.len() as f64) < (sample.len() as f64 * 0.95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn algorithm_strategy() -> impl Strategy<Value = CompressionAlgorithm> {
        prop_oneof![
            Just(CompressionAlgorithm::None),
            Just(CompressionAlgorithm::Lz4),
            (1i32..=6).prop_map(|level| CompressionAlgorithm::Zstd { level }),
        ]
    }

    proptest! {
        // What the writer compresses, the reader must recover exactly under
        // every algorithm the ledger config can name.
        #[test]
        fn prop_payload_survives_roundtrip(
            data in prop::collection::vec(any::<u8>(), 0..60_000),
            algo in algorithm_strategy(),
        ) {
            let stored = compress(&data, algo).unwrap();
            let recovered = decompress(&stored, algo).unwrap();
            prop_assert_eq!(recovered, data);
        }
    }

    #[test]
    fn empty_roundtrips() {
        for algo in [
            CompressionAlgorithm::None,
            CompressionAlgorithm::Lz4,
            CompressionAlgorithm::Zstd { level: 3 },
        ] {
            let c = compress(&[], algo).unwrap();
            let d = decompress(&c, algo).unwrap();
            assert_eq!(d, b"");
        }
    }

    #[test]
    fn compression_is_deterministic() {
        let data = b"the same bytes in, the same bytes out, every single time".repeat(100);
        let a = compress(&data, CompressionAlgorithm::Lz4).unwrap();
        let b = compress(&data, CompressionAlgorithm::Lz4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_decompress_is_an_error_not_a_panic() {
        let garbage = vec![0xFFu8; 256];
        assert!(decompress(&garbage, CompressionAlgorithm::Lz4).is_err());
        assert!(decompress(&garbage, CompressionAlgorithm::Zstd { level: 3 }).is_err());
    }
}
