//! Typed access to stored API keys, corpora and chat history.

use crate::error::{MurmurError, Result};
use crate::store::{Collection, Store};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Where a corpus came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSource {
    /// File path, URL or other description supplied at import.
    pub origin: String,
    /// Human-readable title, if known.
    pub title: Option<String>,
    /// Number of fragments at import time.
    pub fragment_count: usize,
    /// When the corpus was saved.
    pub imported_at: DateTime<Utc>,
}

/// One question and the answer it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub query: String,
    pub response: String,
    pub asked_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(query: &str, response: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            response: response.to_string(),
            asked_at: Utc::now(),
        }
    }
}

/// Named corpora, API keys and per-corpus chat transcripts.
#[derive(Clone)]
pub struct Library {
    store: Arc<dyn Store>,
}

impl Library {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn get_typed<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<T>> {
        match self.store.get(collection, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn put_typed<T: Serialize>(
        &self,
        collection: Collection,
        key: &str,
        value: &T,
    ) -> Result<()> {
        self.store
            .put(collection, key, serde_json::to_value(value)?)
            .await
    }

    // API keys

    pub async fn save_api_key(&self, name: &str, value: &str) -> Result<()> {
        if name.trim().is_empty() || value.trim().is_empty() {
            return Err(MurmurError::InvalidInput(
                "API key name and value must not be empty".to_string(),
            ));
        }
        self.put_typed(Collection::ApiKeys, name, &value).await
    }

    pub async fn api_key(&self, name: &str) -> Result<Option<String>> {
        self.get_typed(Collection::ApiKeys, name).await
    }

    pub async fn remove_api_key(&self, name: &str) -> Result<bool> {
        self.store.delete(Collection::ApiKeys, name).await
    }

    pub async fn api_key_names(&self) -> Result<Vec<String>> {
        self.store.keys(Collection::ApiKeys).await
    }

    // Corpora

    /// Save (or replace) a corpus and its source description.
    #[instrument(skip(self, fragments), fields(fragments = fragments.len()))]
    pub async fn save_corpus(
        &self,
        name: &str,
        fragments: &[String],
        origin: &str,
        title: Option<&str>,
    ) -> Result<CorpusSource> {
        if name.trim().is_empty() {
            return Err(MurmurError::InvalidInput(
                "Corpus name must not be empty".to_string(),
            ));
        }

        let source = CorpusSource {
            origin: origin.to_string(),
            title: title.map(str::to_string),
            fragment_count: fragments.len(),
            imported_at: Utc::now(),
        };

        self.put_typed(Collection::Corpora, name, &fragments).await?;
        self.put_typed(Collection::Sources, name, &source).await?;

        info!("Saved corpus '{}' with {} fragments", name, fragments.len());
        Ok(source)
    }

    pub async fn corpus(&self, name: &str) -> Result<Option<Vec<String>>> {
        self.get_typed(Collection::Corpora, name).await
    }

    /// Like [`Library::corpus`], but a missing corpus is an error.
    pub async fn require_corpus(&self, name: &str) -> Result<Vec<String>> {
        self.corpus(name)
            .await?
            .ok_or_else(|| MurmurError::NotFound(format!("corpus '{}'", name)))
    }

    pub async fn corpus_source(&self, name: &str) -> Result<Option<CorpusSource>> {
        self.get_typed(Collection::Sources, name).await
    }

    pub async fn corpus_names(&self) -> Result<Vec<String>> {
        self.store.keys(Collection::Corpora).await
    }

    /// Delete a corpus together with its source and chat history.
    pub async fn delete_corpus(&self, name: &str) -> Result<bool> {
        let existed = self.store.delete(Collection::Corpora, name).await?;
        self.store.delete(Collection::Sources, name).await?;
        self.store.delete(Collection::ChatHistory, name).await?;
        Ok(existed)
    }

    // Chat history

    pub async fn history(&self, corpus: &str) -> Result<Vec<ChatTurn>> {
        Ok(self
            .get_typed(Collection::ChatHistory, corpus)
            .await?
            .unwrap_or_default())
    }

    pub async fn append_turn(&self, corpus: &str, turn: ChatTurn) -> Result<()> {
        let mut history = self.history(corpus).await?;
        history.push(turn);
        self.put_typed(Collection::ChatHistory, corpus, &history).await
    }

    pub async fn clear_history(&self, corpus: &str) -> Result<bool> {
        self.store.delete(Collection::ChatHistory, corpus).await
    }
}
