//! Core deterministic primitives.
//!
//! Randomness and hashing live here so the game modules never reach for
//! ambient state.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, RandomSource};
pub use hash::{compute_state_hash, StateHash, StateHasher};
