//! Match configuration: fleet composition and game setup parameters.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::geometry::Geometry;

/// Shortest ship that may appear in a fleet.
pub const MIN_SHIP_LEN: usize = 2;
/// Longest ship that may appear in a fleet.
pub const MAX_SHIP_LEN: usize = 5;

const FLEET_SLOTS: usize = MAX_SHIP_LEN - MIN_SHIP_LEN + 1;

/// Required ship counts by length. The default composition places exactly
/// one 2-cell ship, matching the reference rules; larger fleets are set up
/// with [`FleetSpec::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSpec {
    // counts[i] is the number of ships of length MIN_SHIP_LEN + i
    counts: [u8; FLEET_SLOTS],
}

impl Default for FleetSpec {
    fn default() -> Self {
        let mut counts = [0; FLEET_SLOTS];
        counts[0] = 1; // one 2-cell ship
        Self { counts }
    }
}

impl FleetSpec {
    /// A composition with no ships; combine with [`FleetSpec::set`].
    pub fn empty() -> Self {
        Self {
            counts: [0; FLEET_SLOTS],
        }
    }

    /// Set the required count for ships of `len` cells.
    pub fn set(&mut self, len: usize, count: u8) -> Result<(), ConfigError> {
        if !(MIN_SHIP_LEN..=MAX_SHIP_LEN).contains(&len) {
            return Err(ConfigError::ShipLengthOutOfRange(len));
        }
        self.counts[len - MIN_SHIP_LEN] = count;
        Ok(())
    }

    /// Remaining count for ships of `len` cells. Zero for lengths outside
    /// [2, 5].
    pub fn count(&self, len: usize) -> u8 {
        if !(MIN_SHIP_LEN..=MAX_SHIP_LEN).contains(&len) {
            return 0;
        }
        self.counts[len - MIN_SHIP_LEN]
    }

    /// Consume one ship of `len` cells. Caller checks availability first.
    pub(crate) fn take(&mut self, len: usize) {
        debug_assert!(self.count(len) > 0);
        self.counts[len - MIN_SHIP_LEN] -= 1;
    }

    /// Total number of ships in the composition.
    pub fn total_ships(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Total number of cells the full fleet occupies; this is a player's
    /// starting hit-point count.
    pub fn total_cells(&self) -> u32 {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (MIN_SHIP_LEN + i) as u32 * c as u32)
            .sum()
    }
}

/// Full setup for one match: board size, fleet composition and the two
/// display names. Validated before any player task starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: u8,
    pub fleet: FleetSpec,
    pub player_names: [String; 2],
}

impl GameConfig {
    pub fn new(board_size: u8, fleet: FleetSpec, name1: &str, name2: &str) -> Self {
        Self {
            board_size,
            fleet,
            player_names: [name1.to_string(), name2.to_string()],
        }
    }

    /// Validate size and fleet; returns the bound geometry on success.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        let geometry = Geometry::new(self.board_size)?;
        if self.fleet.total_ships() == 0 {
            return Err(ConfigError::EmptyFleet);
        }
        Ok(geometry)
    }
}
