//! Persisted record types
//!
//! Wire format is camelCase JSON, matching what the management UI reads
//! and writes in the shared collections. Highlight records are owned by
//! this engine; bookmark records are owned by the management UI and only
//! read here (the `url` gates enablement, everything else passes through).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved highlight: a note bound to a text passage on one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRecord {
    /// Unique identifier, the join key between DOM markers and storage
    pub id: String,
    /// Exact page address, compared verbatim on restore
    pub url: String,
    /// Page title at creation time
    #[serde(default)]
    pub title: String,
    /// The literal highlighted substring; the sole relocation key
    pub text: String,
    /// Free-text annotation, mutable after creation
    #[serde(default)]
    pub note: String,
    /// Highlight color, fixed at creation
    pub color: String,
    /// Creation timestamp, write-once
    pub created_at: DateTime<Utc>,
}

impl HighlightRecord {
    /// Create a record with a fresh id and the default color.
    pub fn new(url: &str, title: &str, text: &str, note: &str, color: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: title.to_string(),
            text: text.to_string(),
            note: note.to_string(),
            color: color.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A bookmarked page address; presence enables highlighting on that page.
///
/// Tags and reflection belong to the management UI and round-trip
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Address and title of the page the session is running on.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub url: String,
    pub title: String,
}

impl PageContext {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}
