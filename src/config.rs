//! Configuration for marker rendering and toolbar placement

/// Configuration for marker elements and toolbar placement
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// CSS class for committed highlight markers
    pub highlight_class: String,
    /// CSS class for preview markers
    pub preview_class: String,
    /// Attribute carrying the owning record id on permanent markers
    pub id_attribute: String,
    /// Tag name used for marker elements
    pub marker_tag: String,
    /// Default highlight color assigned at creation
    pub default_color: String,
    /// Vertical offset between a range's box and the toolbar, in px
    pub toolbar_offset: f64,
    /// Minimum toolbar distance from the page edges, in px
    pub toolbar_margin: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            highlight_class: "codex-highlight".to_string(),
            preview_class: "codex-highlight-preview".to_string(),
            id_attribute: "data-highlight-id".to_string(),
            marker_tag: "span".to_string(),
            default_color: "#fff3a6".to_string(),
            toolbar_offset: 50.0,
            toolbar_margin: 10.0,
        }
    }
}
