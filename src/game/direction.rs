//! Move Directions
//!
//! The four directions a player can push, plus the line traversal the move
//! engine uses: each direction splits the board into `GRID_SIZE` lines, each
//! walked from its leading edge (the wall tiles slide toward) inward.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::game::board::Coord;
use crate::GRID_SIZE;

/// Direction of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0
    Up = 0,
    /// Toward the last row
    Down = 1,
    /// Toward column 0
    Left = 2,
    /// Toward the last column
    Right = 3,
}

/// Input that does not name a direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl Direction {
    /// All directions, in discriminant order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Up/Down move columns; Left/Right move rows.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Coordinates of one line, ordered from the leading edge inward.
    ///
    /// `index` selects the row (Left/Right) or column (Up/Down).
    ///
    /// ```
    /// use merge2048::game::{board::Coord, direction::Direction};
    ///
    /// let line = Direction::Right.line(1);
    /// assert_eq!(line[0], Coord::new(1, 3));
    /// assert_eq!(line[3], Coord::new(1, 0));
    /// ```
    pub fn line(self, index: usize) -> [Coord; GRID_SIZE] {
        debug_assert!(index < GRID_SIZE);
        let fixed = index as u8;
        let last = (GRID_SIZE - 1) as u8;

        let mut coords = [Coord::new(0, 0); GRID_SIZE];
        for (step, coord) in coords.iter_mut().enumerate() {
            let step = step as u8;
            *coord = match self {
                Direction::Left => Coord::new(fixed, step),
                Direction::Right => Coord::new(fixed, last - step),
                Direction::Up => Coord::new(step, fixed),
                Direction::Down => Coord::new(last - step, fixed),
            };
        }
        coords
    }

    /// Get direction from index (0-3).
    pub fn from_index(index: u8) -> Option<Direction> {
        Direction::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts direction names in any case and browser arrow-key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            assert_eq!(dir.is_vertical(), dir.opposite().is_vertical());
        }
    }

    #[test]
    fn test_line_leading_edges() {
        assert_eq!(Direction::Left.line(2)[0], Coord::new(2, 0));
        assert_eq!(Direction::Right.line(2)[0], Coord::new(2, 3));
        assert_eq!(Direction::Up.line(2)[0], Coord::new(0, 2));
        assert_eq!(Direction::Down.line(2)[0], Coord::new(3, 2));
    }

    #[test]
    fn test_lines_cover_board_once() {
        for dir in Direction::ALL {
            let mut seen: Vec<Coord> = (0..GRID_SIZE).flat_map(|i| dir.line(i)).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), GRID_SIZE * GRID_SIZE, "{} lines overlap", dir);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("ArrowDown".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(" arrowright ".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(ParseDirectionError("diagonal".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Direction::from_index(0), Some(Direction::Up));
        assert_eq!(Direction::from_index(3), Some(Direction::Right));
        assert_eq!(Direction::from_index(4), None);
    }
}
