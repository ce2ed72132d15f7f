//! Board State
//!
//! The 4x4 grid of tile values. 0 is an empty cell; every other value is a
//! power of two >= 2. Cells are addressed by [`Coord`] in row-major order.

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::hash::StateHasher;
use crate::core::rng::RandomSource;
use crate::{FOUR_TILE_PERCENT, GRID_SIZE, MAX_TILE};

// =============================================================================
// COORDINATES
// =============================================================================

/// A cell position on the board.
///
/// Derived `Ord` compares `row` first, so sorted collections of coordinates
/// iterate in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 is the top row
    pub row: u8,
    /// Column index, 0 is the leftmost column
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row as an array index.
    #[inline]
    pub fn r(self) -> usize {
        self.row as usize
    }

    /// Column as an array index.
    #[inline]
    pub fn c(self) -> usize {
        self.col as usize
    }

    /// All coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE as u8).flat_map(|row| (0..GRID_SIZE as u8).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// =============================================================================
// SPAWNED TILE
// =============================================================================

/// A tile placed by [`Board::spawn_random_tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Where the tile landed
    pub coord: Coord,
    /// 2 or 4
    pub value: u32,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors from building a board out of raw values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell is neither empty nor a power of two in `2..=MAX_TILE`
    #[error("invalid tile {value} at {coord}")]
    InvalidTile {
        /// Offending cell
        coord: Coord,
        /// Offending value
        value: u32,
    },
}

// =============================================================================
// BOARD
// =============================================================================

/// Grid of tile values, `GRID_SIZE` x `GRID_SIZE`.
///
/// Serializes as the bare rows. Deserializing goes through
/// [`Board::from_rows`], so stored boards are validated like any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[[u32; GRID_SIZE]; GRID_SIZE]", into = "[[u32; GRID_SIZE]; GRID_SIZE]")]
pub struct Board {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// A board with every cell empty.
    pub const EMPTY: Board = Board { cells: [[0; GRID_SIZE]; GRID_SIZE] };

    /// Create an empty board.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Build a board from raw rows, validating every tile.
    pub fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Result<Self, BoardError> {
        for coord in Coord::all() {
            let value = rows[coord.r()][coord.c()];
            if !is_valid_tile(value) {
                return Err(BoardError::InvalidTile { coord, value });
            }
        }
        Ok(Self { cells: rows })
    }

    /// Copy of the raw rows.
    pub fn rows(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        self.cells
    }

    /// Value at a coordinate (0 = empty).
    #[inline]
    pub fn get(&self, coord: Coord) -> u32 {
        self.cells[coord.r()][coord.c()]
    }

    /// Overwrite the value at a coordinate.
    ///
    /// Callers are the move engine and the spawner, which only ever write
    /// valid tile values.
    #[inline]
    pub(crate) fn set(&mut self, coord: Coord, value: u32) {
        debug_assert!(is_valid_tile(value), "invalid tile {}", value);
        self.cells[coord.r()][coord.c()] = value;
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|c| self.get(*c) == 0).collect()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|v| **v == 0).count()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        GRID_SIZE * GRID_SIZE - self.empty_count()
    }

    /// Largest tile on the board (0 for an empty board).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|v| *v as u64).sum()
    }

    /// Place a random tile in a random empty cell.
    ///
    /// The cell is picked uniformly from [`empty_cells`](Self::empty_cells);
    /// the value is 2 with 90% probability and 4 otherwise.
    ///
    /// Returns `None` without touching the board or the RNG when the board is
    /// full.
    pub fn spawn_random_tile<R: RandomSource>(&mut self, rng: &mut R) -> Option<SpawnedTile> {
        let empty = self.empty_cells();
        let coord = *rng.choose(&empty)?;

        let value = if rng.chance_percent(FOUR_TILE_PERCENT) { 4 } else { 2 };
        self.set(coord, value);

        Some(SpawnedTile { coord, value })
    }

    /// Hash every cell in row-major order.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        for value in self.cells.iter().flatten() {
            hasher.update_u32(*value);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if *value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<[[u32; GRID_SIZE]; GRID_SIZE]> for Board {
    type Error = BoardError;

    fn try_from(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for [[u32; GRID_SIZE]; GRID_SIZE] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

/// Whether two neighbouring values combine when pushed together.
///
/// Equal nonzero tiles merge, except at [`MAX_TILE`].
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// 0 or a power of two in `2..=MAX_TILE`.
#[inline]
fn is_valid_tile(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

// =============================================================================
// TESTS
// =============================================================================
