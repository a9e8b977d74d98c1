//! Error types for Murmur.

use thiserror::Error;

/// Library-level error type for Murmur operations.
#[derive(Error, Debug)]
pub enum MurmurError {
    #[error("Cannot build an index over an empty corpus")]
    EmptyCorpus,

    #[error("Corpus has no indexable terms (only stop words or punctuation)")]
    EmptyVocabulary,

    #[error("Invalid k: {0} (must be at least 1)")]
    InvalidK(usize),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Murmur operations.
pub type Result<T> = std::result::Result<T, MurmurError>;
