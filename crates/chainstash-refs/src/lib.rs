#![warn(missing_docs)]

//! Chainstash reference protocol: the compact wire format linking a storage
//! key's metadata record to its content-addressed chunks
//!
//! A chunked metadata record is plain text containing self-closing tags of
//! the form `<REF k="HASH" v="VERSION" i="INDEX" o="OPERATOR" s="SOURCE" />`.
//! Parsing is total: malformed input degrades to an empty reference list and
//! the record is then treated as direct, unchunked content.

pub mod reference;
pub mod tag;

pub use reference::Reference;
pub use tag::{
    contains_references, detect_storage_kind, parse_references, serialize_references, StorageKind,
};
