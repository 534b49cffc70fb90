//! Exact nearest-neighbor search over a single request's candidate vectors.
//!
//! The index is a flat batch searched by brute force under squared Euclidean
//! distance. It is built from scratch for every request and dropped when the
//! request ends, so results always reflect the store as it was read.

use crate::error::{AppError, AppResult};

/// One search hit: the vector's position in the build batch and its squared
/// distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Flat in-memory index over one batch of equal-length vectors
#[derive(Debug)]
pub struct EphemeralIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl EphemeralIndex {
    /// Takes ownership of `vectors` and checks they share one dimensionality
    ///
    /// Fails with [`AppError::IndexBuild`] on an empty batch, zero-length
    /// vectors, or mixed lengths.
    pub fn build(vectors: Vec<Vec<f32>>) -> AppResult<Self> {
        let dimension = match vectors.first() {
            Some(first) => first.len(),
            None => return Err(AppError::IndexBuild("empty vector batch".to_string())),
        };

        if dimension == 0 {
            return Err(AppError::IndexBuild("vectors have zero dimensions".to_string()));
        }

        if let Some((position, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != dimension)
        {
            return Err(AppError::IndexBuild(format!(
                "vector at position {} has dimension {}, expected {}",
                position,
                vector.len(),
                dimension
            )));
        }

        Ok(Self { dimension, vectors })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Returns the `k` vectors closest to `query`, nearest first
    ///
    /// `k` is clamped to the batch size. Equal distances are ordered by batch
    /// position, lower first.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(AppError::IndexBuild(format!(
                "query vector has dimension {}, index has {}",
                query.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: squared_l2(query, vector),
            })
            .collect();

        // Stable sort keeps batch order among equal distances
        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(k.min(self.vectors.len()));

        Ok(scored)
    }
}

/// Squared Euclidean distance between two equal-length vectors
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
