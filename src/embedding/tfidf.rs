//! TF-IDF vectorizer.
//!
//! Weights are raw term counts times a smoothed inverse document frequency,
//! `ln((1 + n) / (1 + df)) + 1`, and each row is L2-normalized.

use super::{Embedder, Tokenizer};
use crate::error::{MurmurError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument};

/// A TF-IDF model fitted on a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    /// Term to column. Columns follow lexicographic term order.
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and IDF weights on a corpus.
    #[instrument(skip_all, fields(fragments = corpus.len()))]
    pub fn fit(corpus: &[String]) -> Result<Self> {
        if corpus.is_empty() {
            return Err(MurmurError::EmptyCorpus);
        }

        let tokenizer = Tokenizer::new();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for fragment in corpus {
            let distinct: BTreeSet<String> = tokenizer.tokenize(fragment).into_iter().collect();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(MurmurError::EmptyVocabulary);
        }

        let n_docs = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            let weight = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
            idf.push(weight as f32);
            vocabulary.insert(term, column);
        }

        debug!("Fitted vocabulary of {} terms", vocabulary.len());

        Ok(Self {
            tokenizer,
            vocabulary,
            idf,
        })
    }

    /// Fit on a corpus and return the vector of every fragment, in order.
    pub fn fit_transform(corpus: &[String]) -> Result<(Self, Vec<Vec<f32>>)> {
        let vectorizer = Self::fit(corpus)?;
        let vectors = corpus.iter().map(|f| vectorizer.transform(f)).collect();
        Ok((vectorizer, vectors))
    }

    /// Embed text into the fitted space. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in self.tokenizer.tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }

        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for (column, count) in counts {
            vector[column] = count as f32 * self.idf[column];
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        vector
    }

    /// The fitted vocabulary.
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }
}

impl Embedder for TfidfVectorizer {
    fn embed(&self, text: &str) -> Vec<f32> {
        self.transform(text)
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}
