//! Text ranges over live document nodes
//!
//! A range addresses a span of characters between two points inside text
//! nodes, the way a browser `Range` does. Offsets are byte offsets into
//! the node's text and sit on char boundaries.

use super::tree::{Document, NodeId};

/// One endpoint of a text range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePoint {
    pub node: NodeId,
    pub offset: usize,
}

/// A span of text between two points in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: RangePoint,
    pub end: RangePoint,
}

impl TextRange {
    pub fn new(start_node: NodeId, start_offset: usize, end_node: NodeId, end_offset: usize) -> Self {
        Self {
            start: RangePoint {
                node: start_node,
                offset: start_offset,
            },
            end: RangePoint {
                node: end_node,
                offset: end_offset,
            },
        }
    }

    /// A range within a single text node.
    pub fn within(node: NodeId, start: usize, end: usize) -> Self {
        Self::new(node, start, node, end)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

impl Document {
    /// Text nodes the range touches, in document order.
    ///
    /// Empty and whitespace-only leaves are skipped; a target that lives
    /// only in such nodes renders nothing. Returns empty when either
    /// endpoint is no longer attached under the root.
    pub fn nodes_in_range(&self, range: &TextRange) -> Vec<NodeId> {
        let leaves = self.text_nodes_under(self.root());
        let Some(start_idx) = leaves.iter().position(|&n| n == range.start.node) else {
            return Vec::new();
        };
        let Some(end_idx) = leaves.iter().position(|&n| n == range.end.node) else {
            return Vec::new();
        };
        if end_idx < start_idx {
            return Vec::new();
        }

        leaves[start_idx..=end_idx]
            .iter()
            .copied()
            .filter(|&n| {
                self.text(n)
                    .map(|t| !t.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// The character span of `range` within one of its touched nodes.
    ///
    /// The first node starts at the range's start offset, the last ends at
    /// the range's end offset, fully-enclosed middle nodes span entirely.
    pub fn range_offsets_in(&self, range: &TextRange, node: NodeId) -> (usize, usize) {
        let len = self.text(node).map(|t| t.len()).unwrap_or(0);
        let start = if node == range.start.node {
            range.start.offset.min(len)
        } else {
            0
        };
        let end = if node == range.end.node {
            range.end.offset.min(len)
        } else {
            len
        };
        (start, end.max(start))
    }

    /// Concatenated text covered by the range.
    pub fn range_text(&self, range: &TextRange) -> String {
        let mut out = String::new();
        for node in self.nodes_in_range(range) {
            let (start, end) = self.range_offsets_in(range, node);
            if let Some(text) = self.text(node) {
                out.push_str(&text[start..end]);
            }
        }
        out
    }
}
