//! Chainstash test and validation infrastructure
//!
//! Provides a mock ledger and scriptable relay for exercising the full write
//! path (strategy → preparation → retried submission) and read path
//! (metadata → references → chunk fetch → reassembly) without a chain.

pub mod harness;

pub use harness::{read_content, FlakyRelay, MockLedger};

#[cfg(test)]
mod write_read_e2e;
