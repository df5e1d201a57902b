//! Flat L2 index - exact brute-force k-NN over a contiguous vector store
//!
//! Every query scans all N vectors. For a single document (a handful to a
//! few thousand pages) this is exact and well under a millisecond at 384d,
//! so no graph structure is needed.

use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use thiserror::Error;

use super::distance::euclidean_distance_squared;
use super::pqueue::ScoredItem;

/// Position of a vector in the index (and of its page in the corpus)
pub type IndexHandle = u32;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Cannot build an index from zero vectors")]
    EmptyCorpus,

    #[error("Empty vector")]
    EmptyVector,
}

/// One k-NN hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Squared L2 distance to the query
    pub distance: f32,
    pub handle: IndexHandle,
}

/// k-NN result: ascending by distance, ties by lower handle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    neighbors: Vec<Neighbor>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn first(&self) -> Option<&Neighbor> {
        self.neighbors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }

    pub fn handles(&self) -> Vec<IndexHandle> {
        self.neighbors.iter().map(|n| n.handle).collect()
    }

    pub fn distances(&self) -> Vec<f32> {
        self.neighbors.iter().map(|n| n.distance).collect()
    }

    pub fn into_vec(self) -> Vec<Neighbor> {
        self.neighbors
    }
}

impl IntoIterator for SearchResult {
    type Item = Neighbor;
    type IntoIter = std::vec::IntoIter<Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}

/// Immutable exact L2 index
///
/// Built once from the full vector set; handles are `0..N` in input order.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    /// Row-major N x dimension
    data: Vec<f32>,
    len: usize,
}

impl FlatIndex {
    /// Build from vectors, taking the dimension from the first one
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        let dimension = vectors.first().ok_or(IndexError::EmptyCorpus)?.len();
        Self::with_dimension(dimension, vectors)
    }

    /// Build from vectors that must all have `dimension` components
    pub fn with_dimension(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        if vectors.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        if dimension == 0 {
            return Err(IndexError::EmptyVector);
        }

        let len = vectors.len();
        let mut data = Vec::with_capacity(len * dimension);

        for vector in vectors {
            if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    got: vector.len(),
                });
            }
            data.extend(vector);
        }

        Ok(Self { dimension, data, len })
    }

    /// Number of vectors in the index
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a successfully built index
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Stored vector for a handle
    pub fn vector(&self, handle: IndexHandle) -> Option<&[f32]> {
        let start = (handle as usize).checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    fn rows(&self) -> impl Iterator<Item = (IndexHandle, &[f32])> {
        self.data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(i, row)| (i as IndexHandle, row))
    }

    /// Exact k nearest neighbors under squared L2
    ///
    /// Returns `min(k, len)` hits. A bounded max-heap keeps the current k
    /// best; the worst of them sits on top and is evicted first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<SearchResult, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }

        let k = k.min(self.len);
        if k == 0 {
            return Ok(SearchResult::default());
        }

        let mut heap: BinaryHeap<ScoredItem<IndexHandle>> = BinaryHeap::with_capacity(k + 1);

        for (handle, row) in self.rows() {
            let candidate = ScoredItem {
                score: euclidean_distance_squared(query, row),
                item: handle,
            };

            if heap.len() < k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                heap.pop();
                heap.push(candidate);
            }
        }

        let neighbors = heap
            .into_sorted_vec()
            .into_iter()
            .map(|s| Neighbor {
                distance: s.score,
                handle: s.item,
            })
            .collect();

        Ok(SearchResult { neighbors })
    }
}
