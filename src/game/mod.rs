//! Game Logic Module
//!
//! All rules code. Deterministic given the injected RNG.
//!
//! ## Module Structure
//!
//! - `board`: Grid state, empty-cell queries, random spawning
//! - `direction`: Move directions and line traversal
//! - `engine`: Slide and merge for one move
//! - `rules`: Win and game-over detection
//! - `events`: Post-move events for presentation adapters
//! - `session`: Score, best score, status, move sequencing

pub mod board;
pub mod direction;
pub mod engine;
pub mod rules;
pub mod events;
pub mod session;

// Re-export key types
pub use board::{can_merge, Board, BoardError, Coord, SpawnedTile};
pub use direction::{Direction, ParseDirectionError};
pub use engine::{apply_move, slide_line, MoveResult, Movement};
pub use rules::{can_move, has_won, has_won_with, is_game_over, legal_directions, WinRule};
pub use events::{GameEvent, GameEventData};
pub use session::{replay_game, GameConfig, GameSession, GameSnapshot, GameStatus, SessionError, TurnResult};
