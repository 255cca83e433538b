//! Player input sources: where placements and targets come from.

use std::collections::{HashSet, VecDeque};

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{BoardSnapshot, CellState};
use crate::common::PlaceError;
use crate::geometry::{Coord, Geometry};

/// Supplies a player's decisions. This is the seam where a console prompt,
/// a script or a random generator plugs into the actor; the actor validates
/// every proposal and asks again on rejection.
pub trait Tactician: Send {
    /// Propose an ordered run of cells for a ship of `length` cells.
    fn propose_ship(
        &mut self,
        geometry: &Geometry,
        length: usize,
        board: &BoardSnapshot,
    ) -> Vec<Coord>;

    /// Propose the next target against the opponent. `attacked` holds every
    /// coordinate this player has fired at before.
    fn select_target(&mut self, geometry: &Geometry, attacked: &HashSet<Coord>) -> Coord;

    /// Inform the tactician that its last run was rejected, so interactive
    /// implementations can explain the retry prompt.
    fn placement_rejected(&mut self, _run: &[Coord], _err: PlaceError) {}

    /// Inform the tactician that its last target was already attacked.
    fn target_rejected(&mut self, _target: Coord) {}
}

/// Random placements and targets from a seeded [`SmallRng`], so demo games
/// are reproducible from a seed.
pub struct RandomTactician {
    rng: SmallRng,
}

impl RandomTactician {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    fn random_run(&mut self, geometry: &Geometry, length: usize) -> Vec<Coord> {
        let n = geometry.size();
        let horizontal = self.rng.random::<bool>();
        let span = n - (length as u8 - 1);
        let (row, col) = if horizontal {
            (self.rng.random_range(0..n), self.rng.random_range(0..span))
        } else {
            (self.rng.random_range(0..span), self.rng.random_range(0..n))
        };
        (0..length as u8)
            .map(|i| {
                let (r, c) = if horizontal {
                    (row, col + i)
                } else {
                    (row + i, col)
                };
                // within bounds by construction of span
                geometry.coord(r, c).unwrap()
            })
            .collect()
    }
}

impl Tactician for RandomTactician {
    fn propose_ship(
        &mut self,
        geometry: &Geometry,
        length: usize,
        board: &BoardSnapshot,
    ) -> Vec<Coord> {
        // prefer a run that does not collide with previous placements; the
        // actor re-validates either way
        for _ in 0..100 {
            let run = self.random_run(geometry, length);
            if run.iter().all(|&c| board.cell(c) == CellState::Empty) {
                return run;
            }
        }
        self.random_run(geometry, length)
    }

    fn select_target(&mut self, geometry: &Geometry, attacked: &HashSet<Coord>) -> Coord {
        loop {
            let row = self.rng.random_range(0..geometry.size());
            let col = self.rng.random_range(0..geometry.size());
            let c = geometry.coord(row, col).unwrap();
            if !attacked.contains(&c) {
                return c;
            }
        }
    }
}

/// Plays back a fixed sequence of placements and targets. Used by tests and
/// demos that need exact, reproducible games.
///
/// Panics when asked for more decisions than the script holds; an exhausted
/// script is a defect in the test, not a gameplay error.
#[derive(Default)]
pub struct ScriptedTactician {
    placements: VecDeque<Vec<Coord>>,
    targets: VecDeque<Coord>,
}

impl ScriptedTactician {
    pub fn new(placements: Vec<Vec<Coord>>, targets: Vec<Coord>) -> Self {
        Self {
            placements: placements.into(),
            targets: targets.into(),
        }
    }
}

impl Tactician for ScriptedTactician {
    fn propose_ship(
        &mut self,
        _geometry: &Geometry,
        _length: usize,
        _board: &BoardSnapshot,
    ) -> Vec<Coord> {
        self.placements.pop_front().expect("placement script exhausted")
    }

    fn select_target(&mut self, _geometry: &Geometry, _attacked: &HashSet<Coord>) -> Coord {
        self.targets.pop_front().expect("target script exhausted")
    }
}
