//! Keyword-weighted text embeddings for retrieval.

mod tfidf;
mod tokenizer;

pub use tfidf::TfidfVectorizer;
pub use tokenizer::{Tokenizer, ENGLISH_STOP_WORDS};

/// Trait for a fitted model that maps text into a fixed-dimension space.
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}
