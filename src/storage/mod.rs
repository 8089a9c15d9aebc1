//! Persistence collaborator
//!
//! The engine shares three ordered JSON collections with the management
//! UI through a key-value store: `highlights` (owned here), `bookmarks`
//! and `tags` (owned by the UI; bookmarks are read to derive enablement,
//! tags are never touched). Writes replace a whole collection and fan out
//! a change notification to every subscribed context.
//!
//! Mutations work on raw JSON values so fields written by other contexts
//! round-trip untouched. There is no read-modify-write atomicity: each
//! mutation re-reads the full collection immediately before writing it
//! back, and two contexts racing on the same collection lose one side's
//! change (accepted last-writer-wins, see DESIGN.md).

mod highlights;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::Result;

pub use highlights::HighlightStore;
pub use memory::MemoryStore;

/// Collection holding highlight records
pub const HIGHLIGHTS: &str = "highlights";
/// Collection holding bookmark records, one per tracked page address
pub const BOOKMARKS: &str = "bookmarks";
/// Collection holding the flat tag vocabulary
pub const TAGS: &str = "tags";

/// Notification that another context wrote a collection
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub collection: String,
    pub records: Vec<Value>,
}

/// Ordered-collection key-value store shared with the management UI.
///
/// A missing collection reads as empty; a write replaces the whole
/// collection and notifies subscribers.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn read(&self, collection: &str) -> Result<Vec<Value>>;

    async fn write(&self, collection: &str, records: Vec<Value>) -> Result<()>;

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
