//! Anchor resolution: re-locating stored text in a live document
//!
//! Relocation is exact-substring only, against a single text leaf. That
//! fails across element-split or re-wrapped text and is the documented
//! policy boundary of this engine: a record that no longer matches is
//! simply not restored, never an error.

use crate::dom::{Document, NodeId, TextRange};

/// Locate the first occurrence of `target_text` under `root`.
///
/// Text leaves are visited in document order; empty and whitespace-only
/// leaves are skipped. The first leaf containing the target as a
/// contiguous substring yields a range over exactly that substring.
/// Deterministic for an unchanged tree. Returns `None` when no single
/// leaf contains the target, and for an empty target (an empty stored
/// text can never be meaningfully re-anchored).
pub fn locate(target_text: &str, doc: &Document, root: NodeId) -> Option<TextRange> {
    if target_text.is_empty() {
        return None;
    }

    for node in doc.text_nodes_under(root) {
        let Some(text) = doc.text(node) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        if let Some(index) = text.find(target_text) {
            return Some(TextRange::within(node, index, index + target_text.len()));
        }
    }
    None
}
