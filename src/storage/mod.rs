//! Best Score Storage
//!
//! Persistence adapter for the best score. Not part of the deterministic
//! core: the session only exposes plain integers, and the caller decides
//! when to load and save them through a [`BestScoreStore`].

pub mod best_score;

pub use best_score::{
    load_best_score, BestScoreStore, JsonFileStore, MemoryStore, StoreError, BEST_SCORE_KEY,
};
