//! Game Session
//!
//! Owns the board, score, best score and status, and sequences one move:
//! slide/merge → score → spawn → terminal check. A move that changes nothing
//! is a no-op: no spawn, no score change, no status re-evaluation.
//!
//! `apply_move` takes `&mut self`, so one move always runs to completion
//! before the next can start.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info, instrument, trace};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::board::{Board, SpawnedTile};
use crate::game::direction::Direction;
use crate::game::engine::{apply_move, MoveResult};
use crate::game::events::GameEvent;
use crate::game::rules::{has_won_with, is_game_over, WinRule};
use crate::{STARTING_TILES, WIN_TILE};

// =============================================================================
// STATUS & CONFIG
// =============================================================================

/// Current status of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameStatus {
    /// Accepting moves
    #[default]
    Playing = 0,
    /// The win tile appeared
    Won = 1,
    /// No legal move remains
    Lost = 2,
}

impl GameStatus {
    /// Won and Lost accept no further moves until a new game.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Configuration for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tile that wins the game
    pub win_tile: u32,
    /// How `win_tile` is compared
    pub win_rule: WinRule,
    /// Tiles spawned by `new_game`
    pub starting_tiles: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_tile: WIN_TILE,
            win_rule: WinRule::Exact,
            starting_tiles: STARTING_TILES,
        }
    }
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input arrived after the game ended
    #[error("game is finished ({0:?}); start a new game")]
    Finished(GameStatus),
}

// =============================================================================
// RESULTS
// =============================================================================

/// Result of one `apply_move` call.
#[derive(Clone, Debug)]
pub struct TurnResult {
    /// Slide/merge outcome (board before the spawn)
    pub move_result: MoveResult,
    /// Tile spawned after the move, if the move changed the board
    pub spawned: Option<SpawnedTile>,
    /// Status after the move
    pub status: GameStatus,
    /// Events queued since the last drain, including this move's
    pub events: Vec<GameEvent>,
}

impl TurnResult {
    /// Whether the move changed the board.
    #[inline]
    pub fn changed(&self) -> bool {
        self.move_result.changed
    }
}

/// Plain view of a session for rendering and persistence adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Current board
    pub board: Board,
    /// Current score
    pub score: u32,
    /// Best score seen so far
    pub best_score: u32,
    /// Current status
    pub status: GameStatus,
    /// Applied moves since the game started
    pub move_count: u32,
}

// =============================================================================
// SESSION
// =============================================================================

/// A single-player game session.
pub struct GameSession<R: RandomSource = DeterministicRng> {
    config: GameConfig,
    board: Board,
    score: u32,
    best_score: u32,
    status: GameStatus,
    move_count: u32,
    rng: R,
    pending_events: Vec<GameEvent>,
}

impl GameSession<DeterministicRng> {
    /// Start a game with the default config and a seeded RNG.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameConfig::default(), DeterministicRng::new(seed), 0)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Start a game with an injected RNG and a best score loaded by the
    /// persistence adapter.
    pub fn with_rng(config: GameConfig, rng: R, best_score: u32) -> Self {
        let mut session = Self {
            config,
            board: Board::EMPTY,
            score: 0,
            best_score,
            status: GameStatus::Playing,
            move_count: 0,
            rng,
            pending_events: Vec::new(),
        };
        session.new_game();
        session
    }

    /// Resume a session from a snapshot. No tiles are spawned.
    pub fn from_snapshot(config: GameConfig, rng: R, snapshot: GameSnapshot) -> Self {
        Self {
            config,
            board: snapshot.board,
            score: snapshot.score,
            best_score: snapshot.best_score.max(snapshot.score),
            status: snapshot.status,
            move_count: snapshot.move_count,
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Reset score, status and board, then spawn the starting tiles.
    ///
    /// The best score is kept.
    pub fn new_game(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        self.status = GameStatus::Playing;
        self.move_count = 0;

        self.push_event(GameEvent::game_started(self.best_score));
        for _ in 0..self.config.starting_tiles {
            if let Some(tile) = self.board.spawn_random_tile(&mut self.rng) {
                self.push_event(GameEvent::tile_spawned(0, tile));
            }
        }

        info!("New game (best score {})", self.best_score);
    }

    /// Apply one move.
    ///
    /// A terminal session rejects the input. A move that changes nothing
    /// returns `changed() == false` and leaves the session untouched.
    #[instrument(skip(self), fields(move_count = self.move_count))]
    pub fn apply_move(&mut self, direction: Direction) -> Result<TurnResult, SessionError> {
        if self.status.is_terminal() {
            return Err(SessionError::Finished(self.status));
        }

        let move_result = apply_move(&self.board, direction);
        if !move_result.changed {
            trace!("No-op move");
            return Ok(TurnResult {
                move_result,
                spawned: None,
                status: self.status,
                events: self.take_events(),
            });
        }

        // 1. Commit the slide
        self.move_count += 1;
        self.board = move_result.new_board;
        self.push_event(GameEvent::tiles_moved(
            self.move_count,
            direction,
            move_result.movements.clone(),
            move_result.merged_cells.clone(),
        ));

        // 2. Score
        if move_result.score_delta > 0 {
            self.add_score(move_result.score_delta);
        }

        // 3. Spawn
        let spawned = self.board.spawn_random_tile(&mut self.rng);
        if let Some(tile) = spawned {
            self.push_event(GameEvent::tile_spawned(self.move_count, tile));
        }

        // 4. Terminal check
        let new_status = self.evaluate_status();
        if new_status != self.status {
            info!("Game {:?} after {} moves, score {}", new_status, self.move_count, self.score);
            self.push_event(GameEvent::status_changed(self.move_count, self.status, new_status));
            self.status = new_status;
        }

        debug!(
            merges = move_result.merge_count(),
            score_delta = move_result.score_delta,
            score = self.score,
            "Move applied"
        );

        Ok(TurnResult {
            move_result,
            spawned,
            status: self.status,
            events: self.take_events(),
        })
    }

    fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        self.push_event(GameEvent::score_changed(
            self.move_count,
            amount,
            self.score,
            self.best_score,
            new_best,
        ));
    }

    fn evaluate_status(&self) -> GameStatus {
        if has_won_with(&self.board, self.config.win_rule, self.config.win_tile) {
            GameStatus::Won
        } else if is_game_over(&self.board) {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score, including the current game.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Board-changing moves since the game started.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The spawn RNG. Saved next to a [`GameSnapshot`], it lets
    /// [`from_snapshot`](Self::from_snapshot) continue the same spawn sequence.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Plain copy of the observable state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            score: self.score,
            best_score: self.best_score,
            status: self.status,
            move_count: self.move_count,
        }
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.move_count, self.score, |hasher| {
            self.board.hash_into(hasher);
            hasher.update_u8(self.status as u8);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

/// Replay a seeded game from a list of directions.
///
/// Stops early once the game reaches a terminal status. Returns the final
/// session and every event in order, starting with the setup events.
pub fn replay_game(
    seed: u64,
    config: GameConfig,
    best_score: u32,
    directions: &[Direction],
) -> (GameSession, Vec<GameEvent>) {
    let mut session = GameSession::with_rng(config, DeterministicRng::new(seed), best_score);
    let mut all_events = session.take_events();

    for &direction in directions {
        match session.apply_move(direction) {
            Ok(turn) => all_events.extend(turn.events),
            Err(_) => break,
        }
        if session.status().is_terminal() {
            break;
        }
    }

    (session, all_events)
}

// =============================================================================
// TESTS
// =============================================================================
