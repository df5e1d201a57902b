//! Vector Index - exact nearest neighbor search over page embeddings
//!
//! - `distance.rs` - Unrolled L2 / magnitude kernels
//! - `pqueue.rs` - Totally ordered heap entries for top-k selection
//! - `flat.rs` - FlatIndex: brute-force k-NN with deterministic tie-breaking

pub mod distance;
pub mod flat;
pub mod pqueue;

pub use flat::{FlatIndex, IndexError, IndexHandle, Neighbor, SearchResult};

#[cfg(test)]
mod tests;
