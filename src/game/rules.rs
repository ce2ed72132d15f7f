//! Terminal-State Rules
//!
//! Win and game-over detection. A game is over only when the board is full
//! and no two orthogonal neighbours match; that is the sole termination
//! predicate (no move limit, no timer).

use serde::{Serialize, Deserialize};

use crate::game::board::{can_merge, Board, Coord};
use crate::game::direction::Direction;
use crate::game::engine::apply_move;
use crate::{GRID_SIZE, WIN_TILE};

/// How the win tile is compared against the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Some cell equals the target exactly
    #[default]
    Exact,
    /// Some cell is at least the target
    AtLeast,
}

/// True iff some cell equals 2048.
pub fn has_won(board: &Board) -> bool {
    has_won_with(board, WinRule::Exact, WIN_TILE)
}

/// Win check with an explicit rule and target tile.
pub fn has_won_with(board: &Board, rule: WinRule, target: u32) -> bool {
    Coord::all().any(|c| {
        let value = board.get(c);
        match rule {
            WinRule::Exact => value == target,
            WinRule::AtLeast => value >= target,
        }
    })
}

/// True iff the board is full and no two adjacent cells can merge.
pub fn is_game_over(board: &Board) -> bool {
    if board.empty_count() > 0 {
        return false;
    }

    let cells = board.rows();

    // Horizontal neighbours
    for row in &cells {
        if row.windows(2).any(|pair| can_merge(pair[0], pair[1])) {
            return false;
        }
    }

    // Vertical neighbours
    for row in 0..GRID_SIZE - 1 {
        for col in 0..GRID_SIZE {
            if can_merge(cells[row][col], cells[row + 1][col]) {
                return false;
            }
        }
    }

    true
}

/// Whether moving in `direction` would change the board.
pub fn can_move(board: &Board, direction: Direction) -> bool {
    apply_move(board, direction).changed
}

/// Directions that would change the board, in [`Direction::ALL`] order.
pub fn legal_directions(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| can_move(board, *dir))
        .collect()
}
