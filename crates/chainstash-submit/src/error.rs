//! Error types for the chainstash-submit subsystem
//!
//! Environmental failures (relay, recheck) are retried or logged and never
//! abort a session; the caller-contract violations are the only fatal cases.

/// All errors that can occur while submitting prepared transactions
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The relay rejected or could not deliver a submission batch
    #[error("Relay submission failed: {0}")]
    Relay(String),
    /// The on-chain recheck collaborator failed
    #[error("On-chain recheck failed: {0}")]
    Recheck(String),
    /// Caller contract violation: a retry session needs a non-empty failed
    /// set from an antecedent submission to merge against
    #[error("Retry session started with no failed transactions to retry")]
    NothingToRetry,
    /// Caller contract violation: a failed index does not address the
    /// submitted transaction list
    #[error("Failed index {index} is out of range for {count} transactions")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the transaction list
        count: usize,
    },
}
