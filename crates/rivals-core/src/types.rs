//! Core type definitions for the automaton.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell: `Dead` or one of the active species.
///
/// Species are numbered from 1; a grid configured for `n` species only
/// ever holds values in `0..=n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct CellState(pub u8);

impl CellState {
    pub const DEAD: CellState = CellState(0);
    pub const WHITE: CellState = CellState(1);
    pub const RED: CellState = CellState(2);
    pub const BLUE: CellState = CellState(3);

    /// Largest species count representable in one byte next to `Dead`.
    pub const MAX_SPECIES: usize = u8::MAX as usize;

    /// State for the zero-based species `index`.
    pub fn species(index: usize) -> Self {
        debug_assert!(index < Self::MAX_SPECIES);
        CellState(index as u8 + 1)
    }

    /// Zero-based species index, `None` for `Dead`.
    pub fn species_index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            n => Some(n as usize - 1),
        }
    }

    pub fn is_dead(self) -> bool {
        self.0 == 0
    }

    pub fn is_alive(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CellState::DEAD => write!(f, "dead"),
            CellState::WHITE => write!(f, "white"),
            CellState::RED => write!(f, "red"),
            CellState::BLUE => write!(f, "blue"),
            CellState(n) => write!(f, "species-{}", n),
        }
    }
}

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions.
    ///
    /// Uses the euclidean remainder, so negative coordinates wrap to the far edge.
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    /// Squared euclidean distance measured the short way round the torus.
    pub fn wrapped_distance_squared(&self, other: &Position, width: i32, height: i32) -> i64 {
        let dx = axis_distance(self.x, other.x, width);
        let dy = axis_distance(self.y, other.y, height);
        dx * dx + dy * dy
    }
}

fn axis_distance(a: i32, b: i32, dim: i32) -> i64 {
    let d = (a as i64 - b as i64).rem_euclid(dim as i64);
    d.min(dim as i64 - d)
}

/// Moore neighborhood offsets, row-major from the top-left neighbor.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(5, 5));

        let pos = Position::new(-1, -1);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(9, 9));

        let pos = Position::new(10, 10);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(0, 0));

        let pos = Position::new(-23, 47);
        let wrapped = pos.wrap(10, 7);
        assert_eq!(wrapped, Position::new(7, 5));
    }

    #[test]
    fn test_moore_offsets() {
        assert_eq!(MOORE_OFFSETS.len(), 8);
        assert!(!MOORE_OFFSETS.contains(&(0, 0)));
        assert_eq!(MOORE_OFFSETS[0], (-1, -1));
        assert_eq!(MOORE_OFFSETS[7], (1, 1));
    }

    #[test]
    fn test_wrapped_distance() {
        let a = Position::new(0, 0);
        assert_eq!(a.wrapped_distance_squared(&Position::new(3, 4), 100, 100), 25);
        // Across the seam: 1 step left of 0 is 99.
        assert_eq!(a.wrapped_distance_squared(&Position::new(99, 98), 100, 100), 5);
        assert_eq!(a.wrapped_distance_squared(&Position::new(-1, 0), 100, 100), 1);
    }

    #[test]
    fn test_cell_state_species() {
        assert!(CellState::DEAD.is_dead());
        assert_eq!(CellState::DEAD.species_index(), None);
        assert_eq!(CellState::species(0), CellState::WHITE);
        assert_eq!(CellState::species(2), CellState::BLUE);
        assert_eq!(CellState::RED.species_index(), Some(1));
        assert!(CellState::RED.is_alive());
    }
}
