//! Key/value storage abstraction for Murmur.
//!
//! Application state (API keys, corpora, chat transcripts) lives behind the
//! [`Store`] trait so the retrieval core and its tests never touch the
//! filesystem directly.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Named collection of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Backend API keys by reference name.
    ApiKeys,
    /// Fragment lists by corpus name.
    Corpora,
    /// Where each corpus came from.
    Sources,
    /// Question/answer transcripts by corpus name.
    ChatHistory,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::ApiKeys => "api_keys",
            Collection::Corpora => "corpora",
            Collection::Sources => "sources",
            Collection::ChatHistory => "chat_history",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for storage implementations.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch an entry.
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>>;

    /// Insert or replace an entry.
    async fn put(&self, collection: Collection, key: &str, value: Value) -> Result<()>;

    /// Remove an entry. Returns whether it existed.
    async fn delete(&self, collection: Collection, key: &str) -> Result<bool>;

    /// All keys of a collection, sorted.
    async fn keys(&self, collection: Collection) -> Result<Vec<String>>;
}
