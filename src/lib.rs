//! # merge2048
//!
//! Deterministic rules engine for the 2048 sliding-tile puzzle.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MERGE2048                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seedable RandomSource + Xorshift128+      │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── board.rs    - 4x4 grid, empty cells, tile spawning      │
//! │  ├── direction.rs- Move directions and line traversal        │
//! │  ├── engine.rs   - Slide and merge                           │
//! │  ├── rules.rs    - Win / game over detection                 │
//! │  ├── events.rs   - Post-move events for presentation         │
//! │  └── session.rs  - Score, best score, status                 │
//! │                                                              │
//! │  storage/        - Best score persistence (non-deterministic)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic:
//! - No HashMap (uses BTreeSet for sorted iteration)
//! - No system time dependencies
//! - All randomness comes from an injected [`RandomSource`]
//!
//! Given the same seed and the same directions, a session produces
//! identical boards, scores and events.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod storage;

// Re-export commonly used types
pub use core::rng::{DeterministicRng, RandomSource};
pub use game::board::{Board, Coord, SpawnedTile};
pub use game::direction::Direction;
pub use game::engine::{apply_move, MoveResult, Movement};
pub use game::rules::{has_won, is_game_over};
pub use game::session::{GameConfig, GameSession, GameStatus, TurnResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Side length of the square board.
pub const GRID_SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Largest tile a 4x4 board can reach (131072). Tiles of this value never
/// merge, so every move keeps the board within range.
pub const MAX_TILE: u32 = 1 << 17;

/// Chance (in percent) that a spawned tile is a 4 instead of a 2.
pub const FOUR_TILE_PERCENT: u32 = 10;

/// Number of tiles placed on a fresh board.
pub const STARTING_TILES: u8 = 2;
