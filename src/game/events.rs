//! Game Events
//!
//! Events generated by the session for presentation and persistence
//! adapters. Adapters drain them after each call instead of being called
//! back, so the core never waits on animation timing.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::game::board::{Coord, SpawnedTile};
use crate::game::direction::Direction;
use crate::game::engine::Movement;
use crate::game::session::GameStatus;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A fresh board was set up
    GameStarted {
        best_score: u32,
    },

    /// Tiles slid and merged
    TilesMoved {
        direction: Direction,
        movements: Vec<Movement>,
        merged_cells: BTreeSet<Coord>,
    },

    /// A random tile appeared
    TileSpawned {
        tile: SpawnedTile,
    },

    /// Score went up
    ScoreChanged {
        score_delta: u32,
        new_score: u32,
        best_score: u32,
        new_best: bool,
    },

    /// Session status changed
    StatusChanged {
        old_status: GameStatus,
        new_status: GameStatus,
    },
}

/// A game event tagged with the move that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Move count when the event occurred (0 = game setup)
    pub move_number: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(move_number: u32, data: GameEventData) -> Self {
        Self { move_number, data }
    }

    /// Create game started event.
    pub fn game_started(best_score: u32) -> Self {
        Self::new(0, GameEventData::GameStarted { best_score })
    }

    /// Create tiles moved event.
    pub fn tiles_moved(
        move_number: u32,
        direction: Direction,
        movements: Vec<Movement>,
        merged_cells: BTreeSet<Coord>,
    ) -> Self {
        Self::new(
            move_number,
            GameEventData::TilesMoved {
                direction,
                movements,
                merged_cells,
            },
        )
    }

    /// Create tile spawned event.
    pub fn tile_spawned(move_number: u32, tile: SpawnedTile) -> Self {
        Self::new(move_number, GameEventData::TileSpawned { tile })
    }

    /// Create score changed event.
    pub fn score_changed(
        move_number: u32,
        score_delta: u32,
        new_score: u32,
        best_score: u32,
        new_best: bool,
    ) -> Self {
        Self::new(
            move_number,
            GameEventData::ScoreChanged {
                score_delta,
                new_score,
                best_score,
                new_best,
            },
        )
    }

    /// Create status changed event.
    pub fn status_changed(move_number: u32, old_status: GameStatus, new_status: GameStatus) -> Self {
        Self::new(
            move_number,
            GameEventData::StatusChanged {
                old_status,
                new_status,
            },
        )
    }

    /// Whether this event ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.data,
            GameEventData::StatusChanged { new_status, .. } if new_status.is_terminal()
        )
    }
}
