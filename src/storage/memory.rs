//! In-memory reference store
//!
//! Backs tests and single-process embedding. Change notifications fire on
//! every write, mirroring how a browser extension's storage area notifies
//! all contexts including the writer's own.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use super::{ChangeEvent, CollectionStore};
use crate::error::Result;

pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            collections: Mutex::new(HashMap::new()),
            changes,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn read(&self, collection: &str) -> Result<Vec<Value>> {
        Ok(self
            .collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn write(&self, collection: &str, records: Vec<Value>) -> Result<()> {
        self.collections
            .lock()
            .insert(collection.to_string(), records.clone());
        // nobody listening is fine
        let _ = self.changes.send(ChangeEvent {
            collection: collection.to_string(),
            records,
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}
