//! Vector index abstraction for Murmur.
//!
//! Provides a trait-based interface for nearest-neighbor search over fragment
//! vectors. Row `i` of an index always corresponds to corpus fragment `i`.

mod flat;

pub use flat::FlatL2Index;

use crate::error::Result;

/// A neighbor returned by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row position in the index.
    pub position: usize,
    /// Squared Euclidean distance to the query (lower is closer).
    pub distance: f32,
}

/// Trait for vector index implementations.
pub trait VectorIndex: Send + Sync {
    /// Append a vector. Its row is the current length.
    fn add(&mut self, vector: Vec<f32>) -> Result<()>;

    /// Append vectors in order.
    fn add_batch(&mut self, vectors: Vec<Vec<f32>>) -> Result<usize> {
        let count = vectors.len();
        for vector in vectors {
            self.add(vector)?;
        }
        Ok(count)
    }

    /// Return up to `limit` rows closest to `query`, closest first.
    fn search(&self, query: &[f32], limit: usize) -> Result<Vec<Neighbor>>;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    /// Whether the index holds no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension every stored vector has.
    fn dimensions(&self) -> usize;
}

/// Squared Euclidean distance between two vectors of equal length.
pub fn squared_l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2_distance() {
        assert_eq!(squared_l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }
}
