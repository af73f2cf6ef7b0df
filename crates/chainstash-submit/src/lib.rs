#![warn(missing_docs)]

//! Chainstash submission layer: drives prepared ledger calls to completion
//! through an injected relay, retrying failures with exponential backoff
//!
//! One write is retried as a single labeled batch per attempt: the failed
//! subset is re-submitted together, subset-local results are translated back
//! to original indexes through a frozen pre-iteration index table, and all
//! attempts merge into one accumulated report. Exhausted retries are not an
//! error; the final report simply carries non-empty failed indexes.

pub mod error;
pub mod relay;
pub mod retry;
pub mod session;

pub use error::SubmitError;
pub use relay::{ChainRecheck, Relay, RelayError, RelaySubmitResult};
pub use retry::RetryConfig;
pub use session::{retry_failed, submit_with_retries};
