//! Relay and recheck trait seams plus the index-aligned submission report
//!
//! The relay is the external collaborator that turns a prepared call into a
//! signed, broadcast ledger write. The recheck collaborator re-verifies
//! on-chain state before a re-submission, catching transactions that landed
//! but were reported failed.

use crate::error::SubmitError;
use async_trait::async_trait;
use chainstash_prepare::PreparedTransaction;
use serde::{Deserialize, Serialize};

/// One per-transaction failure in a submission report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayError {
    /// Index into the submitted transaction list
    pub index: usize,
    /// Relay-reported failure description
    pub error: String,
}

/// Index-aligned outcome of one relay submission (or of a whole merged
/// retry session)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySubmitResult {
    /// Ledger transaction hashes for broadcast calls
    pub transaction_hashes: Vec<String>,
    /// Indexes that succeeded
    pub successful_indexes: Vec<usize>,
    /// Indexes still failed
    pub failed_indexes: Vec<usize>,
    /// Per-index failure details for the failed indexes
    pub errors: Vec<RelayError>,
    /// Wallet the relay submitted from
    pub backend_wallet_address: String,
}

impl RelaySubmitResult {
    /// An empty report, the starting point for merge accumulation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no index remains failed.
    pub fn is_complete(&self) -> bool {
        self.failed_indexes.is_empty()
    }
}

/// Submits batches of prepared transactions and reports per-index outcomes.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Submit the batch; the returned report is index-aligned with it.
    async fn submit(
        &self,
        transactions: &[PreparedTransaction],
    ) -> Result<RelaySubmitResult, SubmitError>;
}

/// Re-verifies reportedly-failed transactions against on-chain state.
#[async_trait]
pub trait ChainRecheck: Send + Sync {
    /// Return the subset of `failed_indexes` that is genuinely absent from
    /// the chain; indexes dropped from the result are treated as succeeded.
    async fn still_failed(
        &self,
        failed_indexes: &[usize],
        transactions: &[PreparedTransaction],
        backend_wallet_address: &str,
    ) -> Result<Vec<usize>, SubmitError>;
}
