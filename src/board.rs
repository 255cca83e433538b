//! One player's grid: ship placement and attack resolution.

use serde::{Deserialize, Serialize};

use crate::common::{AttackOutcome, CoordError, PlaceError};
use crate::config::{FleetSpec, MAX_SHIP_LEN, MIN_SHIP_LEN};
use crate::geometry::{Coord, Geometry};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Occupied,
    Hit,
}

/// A player's private board: cell states plus the ships still to be placed.
///
/// Ships have no identity beyond the cells they occupy; sinking is tracked
/// by the owning player as a remaining-hit-point count.
pub struct Board {
    geometry: Geometry,
    cells: Vec<CellState>,
    remaining: FleetSpec,
}

impl Board {
    /// Create an empty board with the full fleet still to place.
    pub fn new(geometry: Geometry, fleet: FleetSpec) -> Self {
        Self {
            geometry,
            cells: vec![CellState::Empty; geometry.cell_count()],
            remaining: fleet,
        }
    }

    /// Geometry this board is bound to.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn idx(&self, c: Coord) -> usize {
        assert!(
            self.geometry.contains(c),
            "coordinate {} lies outside a {1}x{1} board",
            c,
            self.geometry.size()
        );
        c.row() as usize * self.geometry.size() as usize + c.col() as usize
    }

    /// State of one cell.
    ///
    /// Panics when `c` comes from a larger geometry than this board's; use
    /// [`Board::receive_attack`] for input that crosses the ownership
    /// boundary.
    pub fn cell(&self, c: Coord) -> CellState {
        self.cells[self.idx(c)]
    }

    /// Ships of `len` cells still to be placed.
    pub fn remaining(&self, len: usize) -> u8 {
        self.remaining.count(len)
    }

    /// Whether every configured ship has been placed.
    pub fn fleet_placed(&self) -> bool {
        self.remaining.total_ships() == 0
    }

    /// Number of intact (occupied, not yet hit) ship cells.
    pub fn intact_cells(&self) -> u32 {
        self.cells
            .iter()
            .filter(|&&s| s == CellState::Occupied)
            .count() as u32
    }

    /// Place one ship given as an ordered run of cells.
    ///
    /// Validates length, fleet availability, bounds, overlap (against the
    /// board and within the run itself), a single shared axis and
    /// consecutive adjacency. All-or-nothing: the board is only mutated
    /// once every check has passed.
    pub fn place(&mut self, run: &[Coord]) -> Result<(), PlaceError> {
        let len = run.len();
        if !(MIN_SHIP_LEN..=MAX_SHIP_LEN).contains(&len) {
            return Err(PlaceError::SizeOutOfRange(len));
        }
        if self.remaining.count(len) == 0 {
            return Err(PlaceError::FleetExhausted(len));
        }
        for &c in run {
            if !self.geometry.contains(c) {
                return Err(PlaceError::OutOfBounds(c));
            }
        }
        for (i, &c) in run.iter().enumerate() {
            if self.cell(c) != CellState::Empty || run[..i].contains(&c) {
                return Err(PlaceError::Overlap(c));
            }
        }
        let same_row = run.iter().all(|c| c.row() == run[0].row());
        let same_col = run.iter().all(|c| c.col() == run[0].col());
        if !(same_row || same_col) {
            return Err(PlaceError::NotAdjacentRun(run[0], run[len - 1]));
        }
        for pair in run.windows(2) {
            if !self.geometry.adjacent(pair[0], pair[1]) {
                return Err(PlaceError::NotAdjacentRun(pair[0], pair[1]));
            }
        }

        self.remaining.take(len);
        for &c in run {
            let i = self.idx(c);
            self.cells[i] = CellState::Occupied;
        }
        Ok(())
    }

    /// Resolve an attack against `target`.
    ///
    /// An occupied cell becomes hit. A cell that is already hit reports
    /// [`AttackOutcome::AlreadyHit`] without further damage; the attacking
    /// side is expected to filter repeats, but the board stays safe when
    /// asked twice. Empty cells are a miss and nothing is mutated. A
    /// coordinate minted by a larger geometry is rejected rather than
    /// resolved, since attacks arrive from the other player.
    pub fn receive_attack(&mut self, target: Coord) -> Result<AttackOutcome, CoordError> {
        if !self.geometry.contains(target) {
            return Err(CoordError::OutOfBounds);
        }
        let i = self.idx(target);
        Ok(match self.cells[i] {
            CellState::Occupied => {
                self.cells[i] = CellState::Hit;
                AttackOutcome::Hit
            }
            CellState::Hit => AttackOutcome::AlreadyHit,
            CellState::Empty => AttackOutcome::Miss,
        })
    }

    /// Read-only view for rendering and tactics.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.geometry.size(),
            cells: self.cells.clone(),
        }
    }
}

/// Immutable copy of a board's cell states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    size: u8,
    cells: Vec<CellState>,
}

impl BoardSnapshot {
    /// Board edge length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// State of one cell.
    pub fn cell(&self, c: Coord) -> CellState {
        self.cells[c.row() as usize * self.size as usize + c.col() as usize]
    }

    /// Count of cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }
}
