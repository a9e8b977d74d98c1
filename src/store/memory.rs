//! In-memory store implementation.
//!
//! Useful for testing and one-off sessions.

use super::{Collection, Store};
use crate::error::{MurmurError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// In-memory store.
pub struct MemoryStore {
    entries: RwLock<HashMap<Collection, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> MurmurError {
    MurmurError::Storage(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .get(&collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    async fn put(&self, collection: Collection, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries
            .entry(collection)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries
            .get_mut(&collection)
            .map(|c| c.remove(key).is_some())
            .unwrap_or(false))
    }

    async fn keys(&self, collection: Collection) -> Result<Vec<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .get(&collection)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();

        store
            .put(Collection::Corpora, "talk", json!(["a", "b"]))
            .await
            .unwrap();
        store
            .put(Collection::ApiKeys, "talk", json!("secret"))
            .await
            .unwrap();

        assert_eq!(
            store.get(Collection::Corpora, "talk").await.unwrap(),
            Some(json!(["a", "b"]))
        );
        assert_eq!(store.keys(Collection::ApiKeys).await.unwrap(), vec!["talk"]);

        assert!(store.delete(Collection::Corpora, "talk").await.unwrap());
        assert!(!store.delete(Collection::Corpora, "talk").await.unwrap());
        assert!(store.get(Collection::Corpora, "talk").await.unwrap().is_none());
        // Other collections are untouched.
        assert!(store.get(Collection::ApiKeys, "talk").await.unwrap().is_some());
    }
}
