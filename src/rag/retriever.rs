//! Corpus indexing and top-k retrieval.

use crate::embedding::{Embedder, TfidfVectorizer};
use crate::error::{MurmurError, Result};
use crate::vector_store::{FlatL2Index, VectorIndex};
use tracing::{debug, info, instrument};

/// A fragment returned by retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedFragment {
    /// Position of the fragment in the corpus.
    pub position: usize,
    /// The fragment text, verbatim.
    pub text: String,
    /// Squared Euclidean distance to the query vector.
    pub distance: f32,
}

/// A TF-IDF model and flat L2 index fitted on one corpus snapshot.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    fragments: Vec<String>,
    vectorizer: TfidfVectorizer,
    index: FlatL2Index,
}

impl CorpusIndex {
    /// Fit the vectorizer and index every fragment, preserving order.
    #[instrument(skip_all, fields(fragments = corpus.len()))]
    pub fn build(corpus: &[String]) -> Result<Self> {
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(corpus)?;

        let mut index = FlatL2Index::new(vectorizer.dimensions());
        index.add_batch(vectors)?;

        info!(
            "Indexed {} fragments over {} terms",
            index.len(),
            index.dimensions()
        );

        Ok(Self {
            fragments: corpus.to_vec(),
            vectorizer,
            index,
        })
    }

    /// Return the `k` fragments closest to `query`, closest first.
    ///
    /// `k` larger than the corpus is clamped to the corpus size; `k == 0` is
    /// rejected. Query terms outside the vocabulary are ignored.
    #[instrument(skip(self, query), fields(query = %query))]
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedFragment>> {
        let k = self.clamp_k(k)?;
        let query_vector = self.vectorizer.embed(query);

        if query_vector.iter().all(|&x| x == 0.0) {
            debug!("Query has no terms in the corpus vocabulary");
        }

        let neighbors = self.index.search(&query_vector, k)?;

        Ok(neighbors
            .into_iter()
            .map(|n| RetrievedFragment {
                position: n.position,
                text: self.fragments[n.position].clone(),
                distance: n.distance,
            })
            .collect())
    }

    /// Validate `k` and clamp it to the corpus size.
    pub fn clamp_k(&self, k: usize) -> Result<usize> {
        if k == 0 {
            return Err(MurmurError::InvalidK(k));
        }
        Ok(k.min(self.fragments.len()))
    }

    /// The indexed fragments, in corpus order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The fitted vectorizer, usable to embed more text into the same space.
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// The populated vector index.
    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Build an index over `corpus` and return the texts of the `k` closest fragments.
pub fn retrieve(corpus: &[String], query: &str, k: usize) -> Result<Vec<String>> {
    let index = CorpusIndex::build(corpus)?;
    Ok(index
        .retrieve(query, k)?
        .into_iter()
        .map(|f| f.text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn positions(results: &[RetrievedFragment]) -> Vec<usize> {
        results.iter().map(|f| f.position).collect()
    }

    #[test]
    fn test_end_to_end_example() {
        let corpus = corpus(&["I love cats", "I love dogs", "The weather is nice today"]);
        let top = retrieve(&corpus, "cats", 1).unwrap();
        assert_eq!(top, vec!["I love cats".to_string()]);
    }

    #[test]
    fn test_rank_correctness() {
        let corpus = corpus(&[
            "apples grow on trees",
            "bread needs flour",
            "rust compiler borrow checker",
            "football match tonight",
            "piano lessons weekly",
        ]);
        let index = CorpusIndex::build(&corpus).unwrap();
        let results = index.retrieve("borrow checker rust compiler", 1).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].position, 2);
        assert_eq!(results[0].text, "rust compiler borrow checker");
    }

    #[test]
    fn test_determinism() {
        let corpus = corpus(&[
            "great video thanks",
            "audio is too quiet",
            "thanks for the audio fix",
            "great editing",
        ]);

        let first = CorpusIndex::build(&corpus)
            .unwrap()
            .retrieve("audio thanks", 3)
            .unwrap();
        let second = CorpusIndex::build(&corpus)
            .unwrap()
            .retrieve("audio thanks", 3)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_dimension_invariant() {
        let corpus = corpus(&["short one", "a much longer fragment with many words", "one"]);
        let index = CorpusIndex::build(&corpus).unwrap();
        let dims = index.vectorizer().vocabulary().len();

        assert_eq!(index.index().len(), corpus.len());
        for position in 0..corpus.len() {
            assert_eq!(index.index().vector(position).unwrap().len(), dims);
        }
        assert_eq!(index.vectorizer().transform("anything at all").len(), dims);
    }

    #[test]
    fn test_ties_follow_corpus_order() {
        let corpus = corpus(&["cats purr", "dogs bark", "dogs bark"]);
        let index = CorpusIndex::build(&corpus).unwrap();
        let results = index.retrieve("dogs", 3).unwrap();

        assert_eq!(positions(&results), vec![1, 2, 0]);
        assert_eq!(results[0].distance, results[1].distance);
    }

    #[test]
    fn test_out_of_vocabulary_query() {
        let corpus = corpus(&["cats purr", "dogs bark", "birds sing"]);
        let index = CorpusIndex::build(&corpus).unwrap();
        let results = index.retrieve("xylophone", 2).unwrap();

        assert_eq!(positions(&results), vec![0, 1]);
    }

    #[test]
    fn test_k_is_clamped_to_corpus_size() {
        let corpus = corpus(&["cats purr", "dogs bark", "cats and dogs"]);
        let index = CorpusIndex::build(&corpus).unwrap();
        let results = index.retrieve("cats", 10).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let index = CorpusIndex::build(&corpus(&["cats purr"])).unwrap();
        assert!(matches!(index.retrieve("cats", 0), Err(MurmurError::InvalidK(0))));
    }

    #[test]
    fn test_empty_corpus() {
        assert!(matches!(CorpusIndex::build(&[]), Err(MurmurError::EmptyCorpus)));
    }

    #[test]
    fn test_duplicates_are_retained() {
        let corpus = corpus(&["same words", "same words"]);
        let index = CorpusIndex::build(&corpus).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.retrieve("same", 5).unwrap().len(), 2);
    }
}
