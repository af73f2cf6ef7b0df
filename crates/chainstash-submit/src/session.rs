//! The write-retry session: batch re-submission, index translation, and
//! result merging across attempts
//!
//! Index bookkeeping rule: the failed-index list is frozen before each
//! attempt, and every subset-local index the relay reports is translated back
//! to an original index through that frozen table. The live list is never
//! consulted mid-iteration.

use crate::error::SubmitError;
use crate::relay::{ChainRecheck, Relay, RelayError, RelaySubmitResult};
use crate::retry::RetryConfig;
use chainstash_prepare::PreparedTransaction;
use tracing::{debug, warn};

fn mark_succeeded(accumulated: &mut RelaySubmitResult, index: usize) {
    if !accumulated.successful_indexes.contains(&index) {
        accumulated.successful_indexes.push(index);
        accumulated.successful_indexes.sort_unstable();
    }
    accumulated.errors.retain(|e| e.index != index);
}

fn record_error(accumulated: &mut RelaySubmitResult, index: usize, error: String) {
    match accumulated.errors.iter_mut().find(|e| e.index == index) {
        Some(existing) => existing.error = error,
        None => accumulated.errors.push(RelayError { index, error }),
    }
}

/// Fold one attempt's subset-local report into the accumulated result.
/// `frozen` maps subset-local index → original index; it is the failed-index
/// list captured before the attempt was submitted. Returns the original
/// indexes that remain failed.
fn merge_attempt(
    accumulated: &mut RelaySubmitResult,
    report: RelaySubmitResult,
    frozen: &[usize],
) -> Vec<usize> {
    let translate = |local: usize| -> Option<usize> {
        let original = frozen.get(local).copied();
        if original.is_none() {
            warn!(local, subset_len = frozen.len(), "Relay reported an out-of-range index");
        }
        original
    };

    accumulated.transaction_hashes.extend(report.transaction_hashes);
    if !report.backend_wallet_address.is_empty() {
        accumulated.backend_wallet_address = report.backend_wallet_address;
    }
    for local in report.successful_indexes {
        if let Some(original) = translate(local) {
            mark_succeeded(accumulated, original);
        }
    }
    for e in report.errors {
        if let Some(original) = translate(e.index) {
            record_error(accumulated, original, e.error);
        }
    }

    let mut still_failed: Vec<usize> = report
        .failed_indexes
        .into_iter()
        .filter_map(translate)
        .collect();
    still_failed.sort_unstable();
    still_failed.dedup();
    still_failed
}

/// Retry the failed subset of an already-submitted transaction list until it
/// drains or `max_retries` attempts are consumed.
///
/// `prior_result` is the antecedent submission's report; all attempts merge
/// into it. A relay error during an attempt is logged and consumes the
/// attempt without changing the failed set. Exhaustion is not an error: the
/// returned report simply keeps its non-empty `failed_indexes`.
///
/// Calling this with an empty `failed_indexes` is a caller contract
/// violation (`SubmitError::NothingToRetry`): there is no antecedent failure
/// to merge against.
pub async fn retry_failed(
    relay: &dyn Relay,
    transactions: &[PreparedTransaction],
    failed_indexes: &[usize],
    prior_result: RelaySubmitResult,
    config: &RetryConfig,
    recheck: Option<&dyn ChainRecheck>,
) -> Result<RelaySubmitResult, SubmitError> {
    if failed_indexes.is_empty() {
        return Err(SubmitError::NothingToRetry);
    }
    if let Some(&index) = failed_indexes.iter().find(|&&i| i >= transactions.len()) {
        return Err(SubmitError::IndexOutOfRange {
            index,
            count: transactions.len(),
        });
    }

    let mut accumulated = prior_result;
    let mut failed: Vec<usize> = failed_indexes.to_vec();
    failed.sort_unstable();
    failed.dedup();

    let mut attempt = 0u32;
    while !failed.is_empty() && attempt < config.max_retries {
        attempt += 1;

        if let Some(recheck) = recheck {
            match recheck
                .still_failed(&failed, transactions, &accumulated.backend_wallet_address)
                .await
            {
                Ok(still) => {
                    // Anything the chain already holds counts as succeeded.
                    // The recheck's answer is only trusted within the prior
                    // failed set; indexes outside it are dropped, like a
                    // relay's out-of-range subset-local indexes.
                    if let Some(&foreign) = still.iter().find(|i| !failed.contains(i)) {
                        warn!(index = foreign, "Recheck reported an index outside the failed set");
                    }
                    let mut confirmed = Vec::with_capacity(failed.len());
                    for &index in &failed {
                        if still.contains(&index) {
                            confirmed.push(index);
                        } else {
                            debug!(index, "Recheck found transaction already on chain");
                            mark_succeeded(&mut accumulated, index);
                        }
                    }
                    failed = confirmed;
                    if failed.is_empty() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Recheck failed; retaining prior failed set");
                }
            }
        }

        let delay = config.backoff(attempt);
        debug!(attempt, delay_ms = delay.as_millis() as u64, remaining = failed.len(),
               "Backing off before retry attempt");
        tokio::time::sleep(delay).await;

        // Freeze the index table before this attempt; all translation of the
        // relay's subset-local report goes through this snapshot.
        let frozen = failed.clone();
        let subset: Vec<PreparedTransaction> =
            frozen.iter().map(|&i| transactions[i].clone()).collect();

        match relay.submit(&subset).await {
            Ok(report) => {
                failed = merge_attempt(&mut accumulated, report, &frozen);
            }
            Err(e) => {
                // Attempt consumed without progress; failed set unchanged.
                warn!(attempt, error = %e, "Relay submission attempt failed");
            }
        }
    }

    if !failed.is_empty() {
        warn!(
            attempts = attempt,
            remaining = failed.len(),
            "Retries exhausted with transactions still failed"
        );
    }
    accumulated.failed_indexes = failed;
    Ok(accumulated)
}

/// Drive one whole write: submit the full list immediately (the only attempt
/// that skips the backoff delay), then retry any failures.
pub async fn submit_with_retries(
    relay: &dyn Relay,
    transactions: &[PreparedTransaction],
    config: &RetryConfig,
    recheck: Option<&dyn ChainRecheck>,
) -> Result<RelaySubmitResult, SubmitError> {
    if transactions.is_empty() {
        return Ok(RelaySubmitResult::empty());
    }

    let identity: Vec<usize> = (0..transactions.len()).collect();
    let mut accumulated = RelaySubmitResult::empty();
    let failed = match relay.submit(transactions).await {
        Ok(report) => merge_attempt(&mut accumulated, report, &identity),
        Err(e) => {
            warn!(error = %e, "Initial submission failed; all transactions enter retry");
            identity
        }
    };
    accumulated.failed_indexes = failed.clone();

    if failed.is_empty() {
        debug!(count = transactions.len(), "Write fully submitted on first attempt");
        return Ok(accumulated);
    }
    retry_failed(relay, transactions, &failed, accumulated, config, recheck).await
}
