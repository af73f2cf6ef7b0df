//! Test harness: in-memory ledger, scriptable relay, and the reader side

use async_trait::async_trait;
use chainstash_codec::{assemble, Chunk, ContentId};
use chainstash_prepare::{
    CallValue, ContractAddress, PreparedTransaction, StorageContracts, TxKind,
};
use chainstash_refs::{detect_storage_kind, parse_references, StorageKind};
use chainstash_submit::{Relay, RelayError, RelaySubmitResult, SubmitError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Initialize test logging once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// In-memory stand-in for the storage contracts: one slot map per contract,
/// keyed by the id argument of the write call.
#[derive(Debug, Default)]
pub struct MockLedger {
    slots: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MockLedger {
    /// Execute a prepared call against the ledger.
    pub fn apply(&self, tx: &PreparedTransaction) {
        let payload = match tx.kind {
            // content store: [id, label, record-or-content]
            TxKind::Normal | TxKind::Metadata => tx.call.args.get(2),
            // chunk store: [id, payload]
            TxKind::Chunked => tx.call.args.get(1),
        };
        let bytes = match payload {
            Some(CallValue::Text(s)) => s.as_bytes().to_vec(),
            Some(CallValue::Bytes(b)) => b.to_vec(),
            Some(CallValue::Id(id)) => id.to_string().into_bytes(),
            None => Vec::new(),
        };
        self.slots
            .lock()
            .unwrap()
            .insert((tx.call.target.0.clone(), tx.id.to_string()), bytes);
    }

    /// Read a slot back, addressed the way references address chunks.
    pub fn get(&self, contract: &ContractAddress, id: &str) -> Option<Vec<u8>> {
        self.slots
            .lock()
            .unwrap()
            .get(&(contract.0.clone(), id.to_string()))
            .cloned()
    }

    /// Drop a slot, simulating a chunk that never became visible.
    pub fn evict(&self, contract: &ContractAddress, id: &str) {
        self.slots
            .lock()
            .unwrap()
            .remove(&(contract.0.clone(), id.to_string()));
    }

    /// Number of populated slots across both contracts.
    pub fn slot_count(&self) -> usize {
        self.slots.lock().unwrap().len()
    }
}

/// Relay that lands transactions on a [`MockLedger`] but fails each
/// transaction id for a configured number of submissions first. Records
/// every batch it is asked to submit.
pub struct FlakyRelay<'a> {
    ledger: &'a MockLedger,
    failure_budget: Mutex<HashMap<ContentId, u32>>,
    batches: Mutex<Vec<usize>>,
    next_hash: Mutex<u64>,
}

impl<'a> FlakyRelay<'a> {
    /// Relay with no scripted failures.
    pub fn reliable(ledger: &'a MockLedger) -> Self {
        Self::new(ledger, Vec::new())
    }

    /// `failures` lists `(transaction id, submissions to fail)` pairs.
    pub fn new(ledger: &'a MockLedger, failures: Vec<(ContentId, u32)>) -> Self {
        Self {
            ledger,
            failure_budget: Mutex::new(failures.into_iter().collect()),
            batches: Mutex::new(Vec::new()),
            next_hash: Mutex::new(0),
        }
    }

    /// Sizes of the batches submitted so far.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Relay for FlakyRelay<'_> {
    async fn submit(
        &self,
        transactions: &[PreparedTransaction],
    ) -> Result<RelaySubmitResult, SubmitError> {
        self.batches.lock().unwrap().push(transactions.len());
        let mut result = RelaySubmitResult {
            backend_wallet_address: "0x00000000000000000000000000000000000ba11e".to_string(),
            ..RelaySubmitResult::empty()
        };
        for (index, tx) in transactions.iter().enumerate() {
            let mut budget = self.failure_budget.lock().unwrap();
            if let Some(remaining) = budget.get_mut(&tx.id).filter(|r| **r > 0) {
                *remaining -= 1;
                result.failed_indexes.push(index);
                result.errors.push(RelayError {
                    index,
                    error: "transient rpc failure".to_string(),
                });
                continue;
            }
            drop(budget);
            self.ledger.apply(tx);
            let mut next = self.next_hash.lock().unwrap();
            result.transaction_hashes.push(format!("0x{:064x}", *next));
            *next += 1;
            result.successful_indexes.push(index);
        }
        Ok(result)
    }
}

/// The reader side: fetch a key's metadata record, follow references if
/// present, reassemble. `None` means "content unavailable" — possibly
/// transiently, when referenced chunks are not visible yet.
pub fn read_content(
    ledger: &MockLedger,
    contracts: &StorageContracts,
    key: &str,
) -> Option<Vec<u8>> {
    let record = ledger.get(&contracts.content_store, &ContentId::for_key(key).to_string())?;
    let text = match std::str::from_utf8(&record) {
        Ok(text) => text,
        // Binary record cannot carry reference tags; it is direct content.
        Err(_) => return Some(record),
    };
    match detect_storage_kind(text) {
        StorageKind::Direct => Some(record),
        StorageKind::Chunked => {
            let mut refs = parse_references(text);
            refs.sort_by_key(|r| r.index.unwrap_or(u64::MAX));
            let mut chunks = Vec::with_capacity(refs.len());
            for (index, r) in refs.iter().enumerate() {
                let data = ledger.get(&contracts.chunk_store, &r.hash)?;
                let id = ContentId::for_bytes(&data);
                if id.to_string() != r.hash {
                    // Stored bytes do not match their content address.
                    return None;
                }
                chunks.push(Chunk {
                    data: data.into(),
                    id,
                    index,
                });
            }
            assemble(&chunks, contracts.compression)
        }
    }
}
