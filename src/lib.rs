//! Murmur - question answering over comments and documents
//!
//! A small retrieval-augmented helper: it indexes a corpus of free-text
//! fragments (video comments, lines of extracted document text) with TF-IDF,
//! finds the fragments nearest to a query, and asks an OpenAI-compatible
//! backend to answer from them.
//!
//! # Architecture
//!
//! - `embedding` - Tokenization and TF-IDF weighting
//! - `vector_store` - Exact nearest-neighbor index under Euclidean distance
//! - `rag` - Indexing, retrieval, prompt assembly and generation backends
//! - `store` - Key/value storage capability (memory, SQLite)
//! - `library` - Typed corpora, API keys and chat history on top of a store
//! - `orchestrator` - Per-query pipeline coordination
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use murmur::rag::{Answerer, CorpusIndex, OpenAIGenerator};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let corpus = vec![
//!         "I love cats".to_string(),
//!         "I love dogs".to_string(),
//!         "The weather is nice today".to_string(),
//!     ];
//!
//!     let index = CorpusIndex::build(&corpus)?;
//!     let context: Vec<String> = index
//!         .retrieve("cats", 1)?
//!         .into_iter()
//!         .map(|f| f.text)
//!         .collect();
//!
//!     let generator = OpenAIGenerator::new(
//!         "http://localhost:1234/v1",
//!         "lm-studio",
//!         Duration::from_secs(300),
//!     )?;
//!     let answerer = Answerer::new(Arc::new(generator), "microsoft/Phi-3-mini-4k-instruct-gguf");
//!     println!("{}", answerer.answer(&context, "What do people love?").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod library;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod store;
pub mod vector_store;

pub use error::{MurmurError, Result};
