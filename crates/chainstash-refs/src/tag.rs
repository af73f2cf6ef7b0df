//! Reference tag scanning and serialization
//!
//! Wire shape: `<REF k="HASH" v="VERSION" i="INDEX" o="OPERATOR" s="SOURCE" />`
//! with `k` and `v` mandatory. Attribute order is not significant on parse;
//! serialization always emits the canonical k, v, i, o, s order.

use crate::reference::Reference;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Whether a metadata record points at chunks or holds content directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Record is a reference list; content lives in chunks
    Chunked,
    /// Record holds the content itself
    Direct,
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<REF\b([^>]*?)/>").expect("tag regex"))
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\b([kvios])\s*=\s*"([^"]*)""#).expect("attr regex"))
}

/// Scan text for reference tags. Tags missing `k` or `v` are skipped;
/// non-matching or malformed input yields an empty list, never an error.
pub fn parse_references(text: &str) -> Vec<Reference> {
    let mut refs = Vec::new();
    for tag in tag_regex().captures_iter(text) {
        let attrs = &tag[1];
        let mut hash = None;
        let mut version = None;
        let mut index = None;
        let mut operator = None;
        let mut source = None;
        for attr in attr_regex().captures_iter(attrs) {
            let value = attr[2].to_string();
            match &attr[1] {
                "k" => hash = Some(value),
                "v" => version = Some(value),
                "i" => index = value.parse::<u64>().ok(),
                "o" => operator = Some(value.to_lowercase()),
                "s" => source = Some(value),
                _ => unreachable!("attr regex only matches k/v/i/o/s"),
            }
        }
        let (Some(hash), Some(version)) = (hash, version) else {
            trace!(tag = &tag[0], "Skipping reference tag without k/v");
            continue;
        };
        refs.push(Reference {
            hash,
            version,
            index,
            operator,
            source,
        });
    }
    refs
}

/// True iff at least one well-formed reference tag is present.
pub fn contains_references(text: &str) -> bool {
    !parse_references(text).is_empty()
}

/// Classify a metadata record: `Chunked` iff it carries reference tags.
pub fn detect_storage_kind(text: &str) -> StorageKind {
    if contains_references(text) {
        StorageKind::Chunked
    } else {
        StorageKind::Direct
    }
}

/// Serialize references in slice order. Optional attributes are written only
/// when set, keeping the metadata record compact.
pub fn serialize_references(refs: &[Reference]) -> String {
    let mut out = String::new();
    for r in refs {
        out.push_str(&format!(r#"<REF k="{}" v="{}""#, r.hash, r.version));
        if let Some(index) = r.index {
            out.push_str(&format!(r#" i="{}""#, index));
        }
        if let Some(operator) = &r.operator {
            out.push_str(&format!(r#" o="{}""#, operator));
        }
        if let Some(source) = &r.source {
            out.push_str(&format!(r#" s="{}""#, source));
        }
        out.push_str(" />");
    }
    out
}
