//! Prepared transactions: id-tagged ledger calls ready for relay submission

use crate::call::{CallDescriptor, CallValue};
use chainstash_codec::ContentId;
use serde::{Deserialize, Serialize};

/// The role a prepared transaction plays in a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    /// Direct content write at a key's slot
    Normal,
    /// Reference-list record at a key's slot
    Metadata,
    /// One chunk payload written to the chunk store
    Chunked,
}

/// A ledger call paired with the id it writes under.
///
/// For `Normal` and `Metadata` the id is the storage key's slot id; for
/// `Chunked` it is the chunk's own content id and is always the call's first
/// argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    /// Slot id (key hash) or chunk id
    pub id: ContentId,
    /// Role of this transaction in the write
    pub kind: TxKind,
    /// The ledger call to submit
    pub call: CallDescriptor,
}

impl PreparedTransaction {
    /// True when the id invariant holds: a chunked transaction's id is its
    /// first call argument.
    pub fn id_invariant_holds(&self) -> bool {
        match self.kind {
            TxKind::Chunked => self.call.args.first() == Some(&CallValue::Id(self.id)),
            TxKind::Normal | TxKind::Metadata => true,
        }
    }
}
