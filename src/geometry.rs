//! Viewport geometry for toolbar placement
//!
//! Layout lives with the host; events arrive with the bounding box of
//! whatever the user touched, and this module turns that box plus the
//! current scroll position into page coordinates for the toolbar.

use crate::config::OverlayConfig;

/// A point in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Current scroll offsets of the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Compute the toolbar's page position for a target box.
///
/// The toolbar sits above the box by the configured offset and never
/// closer than the configured margin to the page origin.
pub fn toolbar_position(rect: Rect, viewport: Viewport, config: &OverlayConfig) -> Point {
    let top = viewport.scroll_y + rect.top - config.toolbar_offset;
    let left = viewport.scroll_x + rect.left;
    Point {
        x: left.max(config.toolbar_margin),
        y: top.max(config.toolbar_margin),
    }
}
