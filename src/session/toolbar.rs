//! Floating toolbar view-model
//!
//! The engine does not draw; it tells the host where the toolbar sits,
//! what the note field holds and which affordances show. The host mirrors
//! typed input back via the session.

use crate::geometry::Point;

/// What the toolbar is currently for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarMode {
    /// A fresh selection about to become a highlight
    Create,
    /// An existing highlight being edited; remove affordance visible
    Edit,
}

/// The one floating toolbar, open at most once per page.
#[derive(Debug, Clone)]
pub struct Toolbar {
    pub position: Point,
    pub note: String,
    pub mode: ToolbarMode,
}

impl Toolbar {
    pub fn create_at(position: Point) -> Self {
        Self {
            position,
            note: String::new(),
            mode: ToolbarMode::Create,
        }
    }

    pub fn edit_at(position: Point, note: &str) -> Self {
        Self {
            position,
            note: note.to_string(),
            mode: ToolbarMode::Edit,
        }
    }

    /// Whether the remove affordance is shown.
    pub fn shows_remove(&self) -> bool {
        self.mode == ToolbarMode::Edit
    }
}
