//! Exact brute-force index under Euclidean distance.

use super::{squared_l2_distance, Neighbor, VectorIndex};
use crate::error::{MurmurError, Result};
use tracing::{debug, instrument};

/// Flat (exhaustive) L2 index.
///
/// Every search scans all rows. Equal distances are ordered by row, so the
/// result for a given index and query is always the same.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of `dimensions` coordinates.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    /// Stored vector at `position`.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(MurmurError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl VectorIndex for FlatL2Index {
    fn add(&mut self, vector: Vec<f32>) -> Result<()> {
        self.check_dimensions(&vector)?;
        self.vectors.push(vector);
        Ok(())
    }

    #[instrument(skip(self, query), fields(rows = self.vectors.len()))]
    fn search(&self, query: &[f32], limit: usize) -> Result<Vec<Neighbor>> {
        self.check_dimensions(query)?;

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: squared_l2_distance(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        neighbors.truncate(limit);

        debug!("Found {} neighbors", neighbors.len());
        Ok(neighbors)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
