//! Board geometry: letter/number addressing, bounds and adjacency checks.
//!
//! A [`Geometry`] is bound to one board size at construction and is the only
//! way to obtain a [`Coord`], so every coordinate in circulation is already
//! bounds-checked against the size it was created for.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, CoordError};

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: u8 = 5;
/// Largest supported board edge (rows run "A" through "J").
pub const MAX_BOARD_SIZE: u8 = 10;

/// A single board position, addressed as row letter plus column number
/// ("A1", "C7", "J10"). Equality and hashing are by (letter, number).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Zero-based row index (letter "A" is row 0).
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Zero-based column index (number 1 is column 0).
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row letter as printed on the board.
    pub fn letter(&self) -> char {
        (b'A' + self.row) as char
    }

    /// Column number as printed on the board.
    pub fn number(&self) -> u8 {
        self.col + 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.number())
    }
}

/// Board geometry for an N×N grid, 5 ≤ N ≤ 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    size: u8,
}

impl Geometry {
    /// Create a geometry for an N×N board. Sizes outside [5, 10] are a
    /// configuration error.
    pub fn new(size: u8) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::BoardSizeOutOfRange(size));
        }
        Ok(Self { size })
    }

    /// Board edge length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Coordinate at zero-based (row, col), if within bounds.
    pub fn coord(&self, row: u8, col: u8) -> Result<Coord, CoordError> {
        if row >= self.size || col >= self.size {
            return Err(CoordError::OutOfBounds);
        }
        Ok(Coord { row, col })
    }

    /// Parse a printed address such as "A1" or "c10". Case-insensitive,
    /// surrounding whitespace ignored.
    pub fn parse(&self, s: &str) -> Result<Coord, CoordError> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or(CoordError::Malformed)?
            .to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(CoordError::Malformed);
        }
        let number: u8 = chars.as_str().parse().map_err(|_| CoordError::Malformed)?;
        let row = (letter as u8) - b'A';
        if row >= self.size || number == 0 || number > self.size {
            return Err(CoordError::OutOfBounds);
        }
        Ok(Coord {
            row,
            col: number - 1,
        })
    }

    /// Whether the coordinate lies on this board.
    pub fn contains(&self, c: Coord) -> bool {
        c.row < self.size && c.col < self.size
    }

    /// Two coordinates are neighbours iff they share a letter and their
    /// numbers differ by exactly 1, or share a number and their letters
    /// differ by exactly 1. Diagonals are not neighbours.
    pub fn adjacent(&self, a: Coord, b: Coord) -> bool {
        (a.row == b.row && a.col.abs_diff(b.col) == 1)
            || (a.col == b.col && a.row.abs_diff(b.row) == 1)
    }

    /// All coordinates in row-major order, for rendering and scanning.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Coord { row, col }))
    }
}
