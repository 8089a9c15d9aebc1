//! Overlay rendering: painting and unpainting marker elements
//!
//! A painted range is materialized as one marker element per touched text
//! node; markers spanning element boundaries form a group sharing the same
//! record id. The renderer keeps an explicit id → marker mapping so
//! "does this id currently have markers" never rescans the tree, and so
//! groups unwrap together.

use std::collections::HashMap;

use tracing::debug;

use crate::config::OverlayConfig;
use crate::dom::{Document, NodeId, TextRange};

/// Visual style of a painted range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerStyle {
    /// A committed highlight carrying its record id
    Permanent { id: String },
    /// The in-progress, not-yet-saved selection
    Preview,
}

/// Paints ranges as marker elements and unwraps them back to plain text.
#[derive(Debug)]
pub struct OverlayRenderer {
    config: OverlayConfig,
    /// Marker elements currently materializing each committed highlight
    markers: HashMap<String, Vec<NodeId>>,
    /// The single preview group, empty when nothing is pending
    preview: Vec<NodeId>,
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            markers: HashMap::new(),
            preview: Vec::new(),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Wrap the in-range substring of every touched text node in a marker.
    ///
    /// Out-of-range text in a partially covered node stays behind as
    /// sibling text nodes. Painting a preview replaces any existing
    /// preview group; painting a permanent style clears the document's
    /// live selection.
    pub fn paint(&mut self, doc: &mut Document, range: &TextRange, style: MarkerStyle) {
        if let MarkerStyle::Preview = style {
            self.clear_preview(doc);
        }

        let nodes = doc.nodes_in_range(range);
        if nodes.is_empty() {
            return;
        }

        let mut created = Vec::new();
        for node in nodes {
            let (start, end) = doc.range_offsets_in(range, node);
            if start == end {
                continue;
            }
            if let Some(marker) = self.wrap_substring(doc, node, start, end, &style) {
                created.push(marker);
            }
        }

        match style {
            MarkerStyle::Permanent { id } => {
                debug!(id = %id, markers = created.len(), "painted permanent highlight");
                // a range whose touched nodes were all zero-width painted
                // nothing; registering it would block a later restore
                if !created.is_empty() {
                    self.markers.entry(id).or_default().extend(created);
                }
                doc.clear_selection();
            }
            MarkerStyle::Preview => {
                self.preview = created;
            }
        }
    }

    /// Replace `node` in its parent with `[before?, marker(middle), after?]`.
    fn wrap_substring(
        &self,
        doc: &mut Document,
        node: NodeId,
        start: usize,
        end: usize,
        style: &MarkerStyle,
    ) -> Option<NodeId> {
        let parent = doc.parent(node)?;
        let index = doc.child_index(node)?;
        let text = doc.text(node)?.to_string();

        doc.detach(node);

        let marker = doc.create_element(&self.config.marker_tag);
        match style {
            MarkerStyle::Permanent { id } => {
                doc.set_attribute(marker, "class", &self.config.highlight_class);
                doc.set_attribute(marker, &self.config.id_attribute, id);
            }
            MarkerStyle::Preview => {
                doc.set_attribute(marker, "class", &self.config.preview_class);
            }
        }
        let middle = doc.create_text(&text[start..end]);
        doc.append_child(marker, middle);

        let mut insert_at = index;
        if start > 0 {
            let before = doc.create_text(&text[..start]);
            doc.insert_child(parent, insert_at, before);
            insert_at += 1;
        }
        doc.insert_child(parent, insert_at, marker);
        insert_at += 1;
        if end < text.len() {
            let after = doc.create_text(&text[end..]);
            doc.insert_child(parent, insert_at, after);
        }

        Some(marker)
    }

    /// Unwrap the current preview group. No-op when none exists.
    pub fn clear_preview(&mut self, doc: &mut Document) {
        let group = std::mem::take(&mut self.preview);
        for marker in group {
            self.unwrap_marker(doc, marker);
        }
    }

    /// Unwrap all markers carrying `id`. No-op for an unknown id.
    pub fn unpaint_id(&mut self, doc: &mut Document, id: &str) {
        if let Some(group) = self.markers.remove(id) {
            debug!(id = %id, markers = group.len(), "unpainting highlight");
            for marker in group {
                self.unwrap_marker(doc, marker);
            }
        }
    }

    /// Unwrap every permanent marker on the page.
    pub fn unpaint_all(&mut self, doc: &mut Document) {
        let all: Vec<Vec<NodeId>> = self.markers.drain().map(|(_, group)| group).collect();
        for group in all {
            for marker in group {
                self.unwrap_marker(doc, marker);
            }
        }
    }

    /// Convert the preview group into permanent markers for `id` in place.
    ///
    /// The marker elements survive the transition, so a live range over
    /// their text stays valid; only class and id attributes change.
    /// Markers already ripped out of the tree by outside mutation are
    /// dropped from the group. Returns false when no attached preview
    /// marker exists.
    pub fn promote_preview(&mut self, doc: &mut Document, id: &str) -> bool {
        let group: Vec<NodeId> = std::mem::take(&mut self.preview)
            .into_iter()
            .filter(|&marker| doc.parent(marker).is_some())
            .collect();
        if group.is_empty() {
            return false;
        }
        for &marker in &group {
            doc.set_attribute(marker, "class", &self.config.highlight_class);
            doc.set_attribute(marker, &self.config.id_attribute, id);
        }
        debug!(id = %id, markers = group.len(), "promoted preview to permanent");
        self.markers.insert(id.to_string(), group);
        true
    }

    /// Whether `id` currently has markers in the tree. O(1).
    pub fn has_markers(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    /// Ids that currently have a registered marker group.
    pub fn painted_ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }

    /// Whether a preview group with at least one marker still in the tree
    /// exists. Markers removed by outside mutation do not count.
    pub fn has_preview(&self, doc: &Document) -> bool {
        self.preview
            .iter()
            .any(|&marker| doc.parent(marker).is_some())
    }

    /// Concatenated text of the preview markers still in the tree.
    pub fn preview_text(&self, doc: &Document) -> String {
        self.preview
            .iter()
            .filter(|&&marker| doc.parent(marker).is_some())
            .map(|&marker| doc.text_content(marker))
            .collect()
    }

    /// Move a marker's children up into its place and drop it.
    ///
    /// A marker already removed from the tree by outside mutation is
    /// skipped: unpainting what is not there is not a fault.
    fn unwrap_marker(&self, doc: &mut Document, marker: NodeId) {
        let Some(parent) = doc.parent(marker) else {
            return;
        };
        let Some(index) = doc.child_index(marker) else {
            return;
        };

        let children: Vec<NodeId> = doc.children(marker).to_vec();
        doc.detach(marker);
        for (i, child) in children.into_iter().enumerate() {
            doc.detach(child);
            doc.insert_child(parent, index + i, child);
        }
        doc.normalize(parent);
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
