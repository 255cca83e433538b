//! Common outcome and error types shared across the engine.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Coord;

/// Result of an attack against a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Target cell carries no ship segment.
    Miss,
    /// Target cell carried an intact ship segment; it is now hit.
    Hit,
    /// Target cell was already hit; nothing changed.
    AlreadyHit,
}

/// Errors returned by `Board::place`. All are recoverable: the caller
/// retries with corrected input and the board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// Ship length outside [2, 5].
    SizeOutOfRange(usize),
    /// No ship of this length left in the fleet composition.
    FleetExhausted(usize),
    /// A cell of the run lies outside the board.
    OutOfBounds(Coord),
    /// A cell of the run is already occupied, or repeated within the run.
    Overlap(Coord),
    /// The run is not a straight sequence of neighbouring cells.
    NotAdjacentRun(Coord, Coord),
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::SizeOutOfRange(len) => {
                write!(f, "ship length {} is outside the allowed range 2..=5", len)
            }
            PlaceError::FleetExhausted(len) => {
                write!(f, "no {}-cell ship left to place", len)
            }
            PlaceError::OutOfBounds(c) => write!(f, "cell {} is outside the board", c),
            PlaceError::Overlap(c) => write!(f, "cell {} is already occupied", c),
            PlaceError::NotAdjacentRun(a, b) => {
                write!(f, "cells {} and {} do not form a straight run", a, b)
            }
        }
    }
}

impl std::error::Error for PlaceError {}

/// Errors from coordinate construction and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordError {
    /// Input does not match the letter-plus-number pattern.
    Malformed,
    /// Address is well-formed but lies outside the board.
    OutOfBounds,
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::Malformed => write!(f, "expected a letter followed by a number, e.g. A1"),
            CoordError::OutOfBounds => write!(f, "coordinate is outside the board"),
        }
    }
}

impl std::error::Error for CoordError {}

/// Setup-time configuration errors, rejected before any player starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Board size outside [5, 10].
    BoardSizeOutOfRange(u8),
    /// Ship length outside [2, 5] in the fleet composition.
    ShipLengthOutOfRange(usize),
    /// Fleet composition contains no ships at all.
    EmptyFleet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSizeOutOfRange(n) => {
                write!(f, "board size {} is outside the allowed range 5..=10", n)
            }
            ConfigError::ShipLengthOutOfRange(len) => {
                write!(f, "ship length {} is outside the allowed range 2..=5", len)
            }
            ConfigError::EmptyFleet => write!(f, "fleet composition contains no ships"),
        }
    }
}

impl std::error::Error for ConfigError {}
