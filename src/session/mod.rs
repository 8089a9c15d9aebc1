//! Interaction session: the page-lifetime annotation state machine
//!
//! One session per page coordinates the single in-flight annotation,
//! either a selection becoming a highlight (`Selecting`) or an existing
//! highlight under edit (`Editing`), with the floating toolbar, the
//! overlay renderer and the persistence collaborator. The two pending
//! fields are exclusive: establishing one clears the other.
//!
//! Event methods take the document and, where placement matters, the
//! bounding box the host observed for the event target. Methods touching
//! storage are async; they hold the exclusive session borrow across the
//! await, so a slow storage completion can never apply against a session
//! that has since transitioned.

mod toolbar;

pub use toolbar::{Toolbar, ToolbarMode};

use std::collections::HashSet;

use tracing::debug;

use crate::anchor;
use crate::dom::{Document, TextRange};
use crate::error::Result;
use crate::geometry::{toolbar_position, Rect, Viewport};
use crate::overlay::{MarkerStyle, OverlayRenderer};
use crate::records::{HighlightRecord, PageContext};
use crate::storage::{ChangeEvent, HighlightStore, BOOKMARKS, HIGHLIGHTS};

/// Observable state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Selecting,
    Editing,
}

/// Selection captured for an in-progress new highlight.
///
/// The selected text is kept alongside the range so the selection can be
/// re-anchored after outside mutation detaches the range's nodes.
#[derive(Debug, Clone)]
struct PendingSelection {
    range: TextRange,
    text: String,
}

/// Page-lifetime coordinator for one in-flight annotation.
pub struct InteractionSession {
    renderer: OverlayRenderer,
    store: HighlightStore,
    /// Selection captured for an in-progress new highlight
    pending: Option<PendingSelection>,
    /// Id of the existing highlight being hovered/edited
    active_record_id: Option<String>,
    /// Derived from the page being bookmarked; false means inert
    enabled: bool,
    toolbar: Option<Toolbar>,
}

impl InteractionSession {
    pub fn new(renderer: OverlayRenderer, store: HighlightStore) -> Self {
        Self {
            renderer,
            store,
            pending: None,
            active_record_id: None,
            enabled: false,
            toolbar: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.pending.is_some() {
            SessionState::Selecting
        } else if self.active_record_id.is_some() {
            SessionState::Editing
        } else {
            SessionState::Idle
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toolbar(&self) -> Option<&Toolbar> {
        self.toolbar.as_ref()
    }

    /// Mirror the host's note-field input into the toolbar model.
    pub fn set_note(&mut self, note: &str) {
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.note = note.to_string();
        }
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    /// Mouse-up completed a selection gesture.
    ///
    /// A non-collapsed, non-whitespace selection outside the toolbar moves
    /// the session to `Selecting`: preview painted over the selection, any
    /// prior pending state cleared, Create toolbar opened under the
    /// selection's box. Anything else closes the toolbar and goes `Idle`.
    pub fn selection_completed(
        &mut self,
        doc: &mut Document,
        rect: Rect,
        viewport: Viewport,
        target_in_toolbar: bool,
    ) {
        if !self.enabled || target_in_toolbar {
            return;
        }

        let Some(range) = doc.selection().copied() else {
            self.close(doc);
            return;
        };
        let text = doc.range_text(&range);
        if range.is_collapsed() || text.trim().is_empty() {
            self.close(doc);
            return;
        }

        self.active_record_id = None;
        self.pending = Some(PendingSelection { range, text });
        self.renderer.paint(doc, &range, MarkerStyle::Preview);
        let position = toolbar_position(rect, viewport, self.renderer.config());
        self.toolbar = Some(Toolbar::create_at(position));
        debug!("selection captured, toolbar opened");
    }

    /// Pointer entered a permanent marker.
    ///
    /// Moves `Idle → Editing` when the record behind `id` still exists;
    /// an orphaned marker (record deleted elsewhere) leaves the session
    /// untouched. No-op while a selection is pending or when already
    /// editing this id.
    pub async fn marker_hovered(
        &mut self,
        doc: &mut Document,
        id: &str,
        rect: Rect,
        viewport: Viewport,
    ) -> Result<()> {
        if !self.enabled || self.pending.is_some() {
            return Ok(());
        }
        if self.toolbar.is_some() && self.active_record_id.as_deref() == Some(id) {
            return Ok(());
        }

        let Some(record) = self.store.find(id).await? else {
            return Ok(());
        };

        self.pending = None;
        self.renderer.clear_preview(doc);
        self.active_record_id = Some(id.to_string());
        let position = toolbar_position(rect, viewport, self.renderer.config());
        self.toolbar = Some(Toolbar::edit_at(position, &record.note));
        Ok(())
    }

    /// Pointer left a permanent marker. Closes the edit toolbar unless the
    /// pointer moved into the toolbar itself.
    pub fn marker_unhovered(&mut self, doc: &mut Document, to_toolbar: bool) {
        if !self.enabled || to_toolbar {
            return;
        }
        if self.active_record_id.is_some() {
            self.close(doc);
        }
    }

    /// Explicit save action.
    ///
    /// `Editing`: persist the edited note only, no repaint. `Selecting`:
    /// promote the preview group (or paint the pending selection directly)
    /// under a fresh id and append a record built from the page context. A
    /// commit with nothing actually selected just closes.
    pub async fn save(&mut self, doc: &mut Document, page: &PageContext) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let note = self
            .toolbar
            .as_ref()
            .map(|toolbar| toolbar.note.trim().to_string())
            .unwrap_or_default();

        if let Some(id) = self.active_record_id.clone() {
            self.store.update_note(&id, &note).await?;
            debug!(id = %id, "note updated");
            self.close(doc);
            return Ok(());
        }

        let preview_text = self.renderer.preview_text(doc);
        let text = if preview_text.is_empty() {
            self.resolve_pending(doc)
                .map(|range| doc.range_text(&range))
                .unwrap_or_default()
        } else {
            preview_text
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            self.close(doc);
            return Ok(());
        }

        let record = HighlightRecord::new(
            &page.url,
            &page.title,
            &text,
            &note,
            &self.renderer.config().default_color,
        );
        if !self.renderer.promote_preview(doc, &record.id) {
            if let Some(range) = self.resolve_pending(doc) {
                self.renderer.paint(
                    doc,
                    &range,
                    MarkerStyle::Permanent {
                        id: record.id.clone(),
                    },
                );
            }
        }
        self.store.append(&record).await?;
        debug!(id = %record.id, "highlight committed");
        self.close(doc);
        Ok(())
    }

    /// Explicit remove action while editing: delete the record, unpaint its
    /// markers, close. No-op outside `Editing`.
    pub async fn remove(&mut self, doc: &mut Document) -> Result<()> {
        let Some(id) = self.active_record_id.clone() else {
            return Ok(());
        };
        self.store.remove(&id).await?;
        self.renderer.unpaint_id(doc, &id);
        debug!(id = %id, "highlight removed");
        self.close(doc);
        Ok(())
    }

    /// Explicit cancel action.
    pub fn dismiss(&mut self, doc: &mut Document) {
        self.close(doc);
    }

    /// The note field regained focus while a selection is still pending.
    ///
    /// Recovers an accidentally unpainted preview by re-painting the
    /// pending selection, re-anchoring by its text when the captured range
    /// no longer resolves; silently does nothing when the text has left
    /// the page.
    pub fn note_focused(&mut self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        if self.renderer.has_preview(doc) {
            return;
        }
        if let Some(range) = self.resolve_pending(doc) {
            self.renderer.paint(doc, &range, MarkerStyle::Preview);
        }
    }

    /// Window scrolled while a selection is pending: the toolbar tracks the
    /// pending selection's current box instead of closing.
    pub fn scrolled(&mut self, rect: Rect, viewport: Viewport) {
        if !self.enabled || self.pending.is_none() {
            return;
        }
        let position = toolbar_position(rect, viewport, self.renderer.config());
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.position = position;
        }
    }

    /// Turn the whole feature on or off.
    ///
    /// Disabling unconditionally unpaints every permanent marker, drops any
    /// preview and closes the toolbar, from any state. Stored records are
    /// untouched. Enabling only flips the flag; callers wanting markers back
    /// run [`restore`](Self::restore).
    pub fn set_enabled(&mut self, doc: &mut Document, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.renderer.unpaint_all(doc);
            self.close(doc);
            debug!("highlighting disabled, page cleared");
        }
    }

    /// Derive enablement from the bookmark collection and re-materialize
    /// highlights when the page is tracked. Called at page load and on
    /// every bookmark-collection change.
    pub async fn refresh_enablement(
        &mut self,
        doc: &mut Document,
        page: &PageContext,
    ) -> Result<()> {
        let enabled = self.store.is_bookmarked(&page.url).await?;
        self.set_enabled(doc, enabled);
        if enabled {
            self.restore(doc, page).await?;
        }
        Ok(())
    }

    /// React to a storage change notification from another context.
    ///
    /// A bookmarks change re-derives enablement. A highlights change
    /// reconciles both ways: records deleted elsewhere lose their markers
    /// (closing the edit toolbar when the edited record is among them),
    /// records added elsewhere are materialized.
    pub async fn storage_changed(
        &mut self,
        doc: &mut Document,
        page: &PageContext,
        event: &ChangeEvent,
    ) -> Result<()> {
        match event.collection.as_str() {
            BOOKMARKS => self.refresh_enablement(doc, page).await,
            HIGHLIGHTS if self.enabled => {
                let records = self.store.for_page(&page.url).await?;
                let kept: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
                for id in self.renderer.painted_ids() {
                    if !kept.contains(id.as_str()) {
                        self.renderer.unpaint_id(doc, &id);
                    }
                }
                let active_vanished = self
                    .active_record_id
                    .as_deref()
                    .is_some_and(|active| !kept.contains(active));
                if active_vanished {
                    self.close(doc);
                }
                self.paint_records(doc, &records);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Re-materialize stored highlights for this page.
    ///
    /// Best-effort and idempotent: records whose id already has markers are
    /// skipped, records whose text no longer matches the page are skipped
    /// silently.
    pub async fn restore(&mut self, doc: &mut Document, page: &PageContext) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let records = self.store.for_page(&page.url).await?;
        self.paint_records(doc, &records);
        Ok(())
    }

    fn paint_records(&mut self, doc: &mut Document, records: &[HighlightRecord]) {
        for record in records {
            if self.renderer.has_markers(&record.id) {
                continue;
            }
            match anchor::locate(&record.text, doc, doc.root()) {
                Some(range) => {
                    self.renderer.paint(
                        doc,
                        &range,
                        MarkerStyle::Permanent {
                            id: record.id.clone(),
                        },
                    );
                }
                None => {
                    debug!(id = %record.id, "stored highlight no longer matches page text");
                }
            }
        }
    }

    /// Current range for the pending selection.
    ///
    /// When the captured range's nodes have left the tree the selection is
    /// re-anchored by its text and the fresh range cached. None when
    /// nothing is pending or the text no longer appears on the page.
    fn resolve_pending(&mut self, doc: &Document) -> Option<TextRange> {
        let pending = self.pending.as_mut()?;
        if !doc.nodes_in_range(&pending.range).is_empty() {
            return Some(pending.range);
        }
        let range = anchor::locate(&pending.text, doc, doc.root())?;
        pending.range = range;
        Some(range)
    }

    /// Close the toolbar and clear all pending state. Permanent markers
    /// stay painted.
    fn close(&mut self, doc: &mut Document) {
        self.toolbar = None;
        self.pending = None;
        self.active_record_id = None;
        self.renderer.clear_preview(doc);
    }
}
