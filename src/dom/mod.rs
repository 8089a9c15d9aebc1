//! Owned document model
//!
//! The engine does not run inside a browser; the host embeds this tree,
//! mirrors page content into it and feeds user events to the session.
//! Nodes live in an arena and are addressed by [`NodeId`], which stays
//! valid for the lifetime of the [`Document`] even as the tree mutates.
//! The overlay renderer's marker registry depends on that property.

mod range;
mod tree;

pub use range::{RangePoint, TextRange};
pub use tree::{Document, NodeData, NodeId};
