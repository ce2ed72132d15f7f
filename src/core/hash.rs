//! State Hashing
//!
//! SHA-256 digest of a session's observable state. Two sessions with the same
//! seed and the same directions end with the same digest, which is how the
//! demo checks a replay against the live game.

use sha2::{Digest, Sha256};

/// 32-byte SHA-256 digest.
pub type StateHash = [u8; 32];

/// Incremental hasher over the integers that make up a session.
///
/// Callers feed fields in a fixed order; reordering them changes the digest.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Start a digest prefixed with `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Hasher for session state, versioned so old digests never collide.
    pub fn for_game_state() -> Self {
        Self::new(b"MERGE2048_STATE_V1")
    }

    /// Feed one byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Feed a tile value or counter, little-endian.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Consume the hasher.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Digest of `move_count`, `score`, then whatever `add_state` feeds
/// (the board cells and the status for a session).
pub fn compute_state_hash<F>(move_count: u32, score: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();
    hasher.update_u32(move_count);
    hasher.update_u32(score);
    add_state(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
