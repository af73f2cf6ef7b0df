//! Preparation: (key, content) → ordered ledger transactions
//!
//! A chunked write always lists its metadata transaction first so a reader
//! observes the reference list no later than the chunks it points at. The
//! ledger gives no multi-call atomicity; a reader that finds references to
//! not-yet-visible chunks treats reassembly failure as transient.

use crate::call::{CallDescriptor, CallValue};
use crate::config::{StorageContracts, PROTOCOL_VERSION};
use crate::error::PrepareError;
use crate::strategy::WriteStrategy;
use crate::transaction::{PreparedTransaction, TxKind};
use bytes::Bytes;
use chainstash_codec::{compress, ChunkSplitter, ChunkSplitterConfig, ContentId};
use chainstash_refs::{serialize_references, Reference};
use tracing::debug;

/// One direct write of content at the key's slot.
pub fn prepare_direct(
    contracts: &StorageContracts,
    key: &str,
    label: &str,
    content: &[u8],
) -> PreparedTransaction {
    let id = ContentId::for_key(key);
    PreparedTransaction {
        id,
        kind: TxKind::Normal,
        call: CallDescriptor {
            target: contracts.content_store.clone(),
            function: contracts.content_write_fn.clone(),
            args: vec![
                CallValue::Id(id),
                CallValue::Text(label.to_string()),
                CallValue::Bytes(Bytes::copy_from_slice(content)),
            ],
        },
    }
}

/// Chunked write: compress, split, one chunk-store call per chunk plus one
/// metadata record listing the references. Metadata is always first in the
/// returned list; every chunk transaction carries its own id as the first
/// call argument.
pub fn prepare_chunked(
    contracts: &StorageContracts,
    chunk_config: ChunkSplitterConfig,
    key: &str,
    label: &str,
    content: &[u8],
    operator: &str,
) -> Result<Vec<PreparedTransaction>, PrepareError> {
    let compressed = compress(content, contracts.compression)?;
    let chunks = ChunkSplitter::new(chunk_config).split(&compressed);

    // The reference list stays compact: the operator attribute is written
    // only when it differs from the one implied by the contracts.
    let operator_attr = if operator.eq_ignore_ascii_case(&contracts.default_operator) {
        None
    } else {
        Some(operator.to_lowercase())
    };

    let mut refs = Vec::with_capacity(chunks.len());
    let mut transactions = Vec::with_capacity(chunks.len() + 1);
    let key_id = ContentId::for_key(key);
    transactions.push(PreparedTransaction {
        id: key_id,
        kind: TxKind::Metadata,
        call: CallDescriptor {
            target: contracts.content_store.clone(),
            function: contracts.content_write_fn.clone(),
            args: Vec::new(), // reference list filled in below
        },
    });

    for chunk in chunks {
        refs.push(Reference {
            hash: chunk.id.to_string(),
            version: PROTOCOL_VERSION.to_string(),
            index: Some(chunk.index as u64),
            operator: operator_attr.clone(),
            source: None,
        });
        transactions.push(PreparedTransaction {
            id: chunk.id,
            kind: TxKind::Chunked,
            call: CallDescriptor {
                target: contracts.chunk_store.clone(),
                function: contracts.chunk_write_fn.clone(),
                args: vec![CallValue::Id(chunk.id), CallValue::Bytes(chunk.data)],
            },
        });
    }

    transactions[0].call.args = vec![
        CallValue::Id(key_id),
        CallValue::Text(label.to_string()),
        CallValue::Text(serialize_references(&refs)),
    ];

    debug!(
        key,
        content_bytes = content.len(),
        compressed_bytes = compressed.len(),
        chunk_count = transactions.len() - 1,
        "Prepared chunked write"
    );
    Ok(transactions)
}

/// Strategy dispatch: direct write when the content fits, chunked otherwise.
pub fn prepare_write(
    contracts: &StorageContracts,
    strategy: &WriteStrategy,
    key: &str,
    label: &str,
    content: &[u8],
    operator: &str,
) -> Result<Vec<PreparedTransaction>, PrepareError> {
    if strategy.should_chunk(content) {
        prepare_chunked(contracts, strategy.chunk, key, label, content, operator)
    } else {
        Ok(vec![prepare_direct(contracts, key, label, content)])
    }
}
