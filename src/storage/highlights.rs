//! Typed facade over the highlight and bookmark collections

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::{CollectionStore, BOOKMARKS, HIGHLIGHTS};
use crate::error::Result;
use crate::records::{BookmarkRecord, HighlightRecord};

/// Read/write access to highlight records plus read access to bookmarks.
///
/// Every mutation re-reads the current collection and writes the whole
/// collection back; rows this engine does not own pass through as raw
/// JSON so foreign fields survive.
#[derive(Clone)]
pub struct HighlightStore {
    store: Arc<dyn CollectionStore>,
}

impl HighlightStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &Arc<dyn CollectionStore> {
        &self.store
    }

    /// All stored highlight records, in insertion order.
    ///
    /// Rows that fail to decode are skipped with a warning rather than
    /// failing the read; a foreign context may have written them.
    pub async fn all(&self) -> Result<Vec<HighlightRecord>> {
        let rows = self.store.read(HIGHLIGHTS).await?;
        Ok(decode_rows(rows, "highlight"))
    }

    /// Highlight records whose url matches `url` exactly.
    pub async fn for_page(&self, url: &str) -> Result<Vec<HighlightRecord>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|record| record.url == url)
            .collect())
    }

    /// Find one record by id.
    pub async fn find(&self, id: &str) -> Result<Option<HighlightRecord>> {
        Ok(self.all().await?.into_iter().find(|record| record.id == id))
    }

    /// Append a new record to the collection.
    pub async fn append(&self, record: &HighlightRecord) -> Result<()> {
        let mut rows = self.store.read(HIGHLIGHTS).await?;
        rows.push(serde_json::to_value(record)?);
        self.store.write(HIGHLIGHTS, rows).await
    }

    /// Update only the note of the record with `id`. Other rows and any
    /// foreign fields on the matching row are untouched.
    pub async fn update_note(&self, id: &str, note: &str) -> Result<()> {
        let mut rows = self.store.read(HIGHLIGHTS).await?;
        for row in rows.iter_mut() {
            if row.get("id").and_then(Value::as_str) == Some(id) {
                row["note"] = Value::String(note.to_string());
            }
        }
        self.store.write(HIGHLIGHTS, rows).await
    }

    /// Delete the record with `id`.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut rows = self.store.read(HIGHLIGHTS).await?;
        rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        self.store.write(HIGHLIGHTS, rows).await
    }

    /// Whether `url` is present in the bookmark collection (exact match).
    pub async fn is_bookmarked(&self, url: &str) -> Result<bool> {
        let rows = self.store.read(BOOKMARKS).await?;
        let bookmarks: Vec<BookmarkRecord> = decode_rows(rows, "bookmark");
        Ok(bookmarks.iter().any(|bookmark| bookmark.url == url))
    }
}

fn decode_rows<T: serde::de::DeserializeOwned>(rows: Vec<Value>, kind: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(kind, %err, "skipping undecodable stored row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn store() -> HighlightStore {
        HighlightStore::new(Arc::new(MemoryStore::new()))
    }

    fn record(url: &str, text: &str, note: &str) -> HighlightRecord {
        HighlightRecord::new(url, "Title", text, note, "#fff3a6")
    }

    #[tokio::test]
    async fn test_append_and_filter_by_page() {
        let store = store();
        store.append(&record("https://a", "one", "")).await.unwrap();
        store.append(&record("https://b", "two", "")).await.unwrap();
        store.append(&record("https://a", "three", "")).await.unwrap();

        let page = store.for_page("https://a").await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text, "one");
        assert_eq!(page[1].text, "three");
    }

    #[tokio::test]
    async fn test_update_note_touches_only_matching_row() {
        let store = store();
        let keep = record("https://a", "keep", "old");
        let edit = record("https://a", "edit", "old");
        store.append(&keep).await.unwrap();
        store.append(&edit).await.unwrap();

        store.update_note(&edit.id, "new note").await.unwrap();

        assert_eq!(store.find(&keep.id).await.unwrap().unwrap().note, "old");
        assert_eq!(store.find(&edit.id).await.unwrap().unwrap().note, "new note");
    }

    #[tokio::test]
    async fn test_update_preserves_foreign_fields() {
        let store = store();
        let mut row = serde_json::to_value(record("https://a", "text", "")).unwrap();
        row["pinnedByUi"] = json!(true);
        let id = row["id"].as_str().unwrap().to_string();
        store.inner().write(HIGHLIGHTS, vec![row]).await.unwrap();

        store.update_note(&id, "annotated").await.unwrap();

        let rows = store.inner().read(HIGHLIGHTS).await.unwrap();
        assert_eq!(rows[0]["pinnedByUi"], json!(true));
        assert_eq!(rows[0]["note"], json!("annotated"));
    }

    #[tokio::test]
    async fn test_remove_by_id() {
        let store = store();
        let a = record("https://a", "one", "");
        let b = record("https://a", "two", "");
        store.append(&a).await.unwrap();
        store.append(&b).await.unwrap();

        store.remove(&a.id).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b.id);
    }

    #[tokio::test]
    async fn test_is_bookmarked_matches_url_exactly() {
        let store = store();
        store
            .inner()
            .write(
                BOOKMARKS,
                vec![json!({"url": "https://a/page", "tags": ["read"]})],
            )
            .await
            .unwrap();

        assert!(store.is_bookmarked("https://a/page").await.unwrap());
        assert!(!store.is_bookmarked("https://a/page/").await.unwrap());
        assert!(!store.is_bookmarked("https://a").await.unwrap());
    }

    #[tokio::test]
    async fn test_undecodable_rows_are_skipped() {
        let store = store();
        let good = serde_json::to_value(record("https://a", "ok", "")).unwrap();
        store
            .inner()
            .write(HIGHLIGHTS, vec![json!({"garbage": 1}), good])
            .await
            .unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "ok");
    }
}
