//! RAG (Retrieval-Augmented Generation) over a corpus of text fragments.
//!
//! Each query runs three explicit steps:
//!
//! 1. [`CorpusIndex::build`] fits a TF-IDF model and a flat L2 index.
//! 2. [`CorpusIndex::retrieve`] returns the `k` nearest fragments.
//! 3. [`Answerer::answer`] sends them with the query to a [`Generator`].

mod answer;
mod generator;
mod retriever;

#[cfg(test)]
pub(crate) mod mock;

pub use answer::{format_context, Answerer, ANSWER_TEMPERATURE};
pub use generator::{GenerationRequest, Generator, OpenAIGenerator};
pub use retriever::{retrieve, CorpusIndex, RetrievedFragment};

/// Default number of fragments retrieved per query.
pub const DEFAULT_TOP_K: usize = 5;
