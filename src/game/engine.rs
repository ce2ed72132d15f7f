//! Move Engine
//!
//! Slide-and-merge for one move. Pure: the input board is never touched and
//! no randomness is involved, so the same board and direction always give the
//! same [`MoveResult`].
//!
//! ## Algorithm (per line)
//!
//! Walk the line from the leading edge inward with a write position starting
//! at the edge. Each nonzero tile either merges into the previously written
//! tile (same value, not already merged this move) or is written at the write
//! position, which then advances. Whatever is left past the last write is 0.
//!
//! A tile created by a merge never merges again in the same move, so
//! `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::game::board::{can_merge, Board, Coord};
use crate::game::direction::Direction;
use crate::GRID_SIZE;

// =============================================================================
// LINE SLIDE (1-D)
// =============================================================================

/// A tile moving within a line, in line-index space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineShift {
    /// Source index (0 = leading edge)
    pub from: usize,
    /// Destination index
    pub to: usize,
    /// Value of the tile before any merge
    pub value: u32,
}

/// Outcome of sliding one line toward index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSlide {
    /// Resulting values
    pub values: [u32; GRID_SIZE],
    /// Sum of the values created by merges
    pub score: u32,
    /// Destination indices that received a merge, ascending
    pub merges: Vec<usize>,
    /// Tiles that left their index, in traversal order
    pub shifts: Vec<LineShift>,
    /// Whether `values` differs from the input
    pub changed: bool,
}

/// Slide and merge a single line toward index 0.
///
/// ```
/// use merge2048::game::engine::slide_line;
///
/// let slide = slide_line([2, 2, 2, 2]);
/// assert_eq!(slide.values, [4, 4, 0, 0]);
/// assert_eq!(slide.score, 8);
/// assert_eq!(slide.merges, vec![0, 1]);
/// ```
pub fn slide_line(line: [u32; GRID_SIZE]) -> LineSlide {
    let mut values = [0u32; GRID_SIZE];
    let mut merged = [false; GRID_SIZE];
    let mut write = 0usize;
    let mut score = 0u32;
    let mut merges = Vec::new();
    let mut shifts = Vec::new();

    for (from, &value) in line.iter().enumerate() {
        if value == 0 {
            continue;
        }

        let target = write.checked_sub(1);
        match target {
            Some(to) if can_merge(values[to], value) && !merged[to] => {
                values[to] = value * 2;
                merged[to] = true;
                score = score.saturating_add(values[to]);
                merges.push(to);
                shifts.push(LineShift { from, to, value });
            }
            _ => {
                values[write] = value;
                if from != write {
                    shifts.push(LineShift { from, to: write, value });
                }
                write += 1;
            }
        }
    }

    LineSlide {
        changed: values != line,
        values,
        score,
        merges,
        shifts,
    }
}

// =============================================================================
// BOARD MOVE
// =============================================================================

/// A tile moving on the board during one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Cell the tile started in
    pub from: Coord,
    /// Cell the tile ended in (the merge target for merged tiles)
    pub to: Coord,
    /// Value of the tile before any merge
    pub value: u32,
}

/// Result of applying a direction to a board.
///
/// Created fresh for every move and not retained by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Direction that was applied
    pub direction: Direction,
    /// Board after sliding and merging (before any spawn)
    pub new_board: Board,
    /// Whether any tile moved or merged
    pub changed: bool,
    /// Points earned: sum of all merged tile values
    pub score_delta: u32,
    /// Cells that received a merge
    pub merged_cells: BTreeSet<Coord>,
    /// Every tile that moved, line by line in line-index order
    pub movements: Vec<Movement>,
}

impl MoveResult {
    /// Number of merges performed.
    pub fn merge_count(&self) -> usize {
        self.merged_cells.len()
    }
}

/// Apply a direction to a board.
///
/// Runs [`slide_line`] on every line the direction defines and maps the
/// results back to board coordinates. Total over every valid board.
pub fn apply_move(board: &Board, direction: Direction) -> MoveResult {
    let mut new_board = *board;
    let mut changed = false;
    let mut score_delta = 0u32;
    let mut merged_cells = BTreeSet::new();
    let mut movements = Vec::new();

    for index in 0..GRID_SIZE {
        let coords = direction.line(index);
        let slide = slide_line(coords.map(|c| board.get(c)));

        for (coord, value) in coords.iter().zip(slide.values) {
            new_board.set(*coord, value);
        }

        changed |= slide.changed;
        score_delta = score_delta.saturating_add(slide.score);
        merged_cells.extend(slide.merges.iter().map(|&i| coords[i]));
        movements.extend(slide.shifts.iter().map(|shift| Movement {
            from: coords[shift.from],
            to: coords[shift.to],
            value: shift.value,
        }));
    }

    MoveResult {
        direction,
        new_board,
        changed,
        score_delta,
        merged_cells,
        movements,
    }
}

// =============================================================================
// TESTS
// =============================================================================
