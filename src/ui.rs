//! Plain-text board rendering for the demo binary and tests.
//!
//! Consumes only the snapshot surface: a player's own board and its own
//! attack history. The opponent's unrevealed layout is never shown.

use crate::board::CellState;
use crate::common::AttackOutcome;
use crate::geometry::Geometry;
use crate::player::{AttackRecord, PlayerSnapshot};

fn header(geometry: &Geometry) -> String {
    let mut out = String::from("  ");
    for n in 1..=geometry.size() {
        out.push_str(&format!(" {:>2}", n));
    }
    out.push('\n');
    out
}

/// Render a player's own board: `S` intact ship segment, `X` hit segment,
/// `_` open water.
pub fn render_own_board(snapshot: &PlayerSnapshot) -> String {
    // snapshot sizes come from a validated Geometry
    let geometry = Geometry::new(snapshot.board.size()).expect("snapshot carries a valid size");
    let mut out = header(&geometry);
    for row in 0..geometry.size() {
        out.push_str(&format!("{} ", (b'A' + row) as char));
        for col in 0..geometry.size() {
            let c = geometry.coord(row, col).expect("within bounds");
            let glyph = match snapshot.board.cell(c) {
                CellState::Empty => '_',
                CellState::Occupied => 'S',
                CellState::Hit => 'X',
            };
            out.push_str(&format!(" {:>2}", glyph));
        }
        out.push('\n');
    }
    out
}

/// Render the tracking view of a player's attacks against the opponent:
/// `X` hit, `O` miss, `_` not yet attacked.
pub fn render_tracking_board(size: u8, attacks: &[AttackRecord]) -> String {
    let geometry = Geometry::new(size).expect("tracking board size is validated at setup");
    let mut out = header(&geometry);
    for row in 0..geometry.size() {
        out.push_str(&format!("{} ", (b'A' + row) as char));
        for col in 0..geometry.size() {
            let c = geometry.coord(row, col).expect("within bounds");
            let glyph = match attacks.iter().find(|a| a.target == c) {
                Some(a) => match a.outcome {
                    AttackOutcome::Hit | AttackOutcome::AlreadyHit => 'X',
                    AttackOutcome::Miss => 'O',
                },
                None => '_',
            };
            out.push_str(&format!(" {:>2}", glyph));
        }
        out.push('\n');
    }
    out
}
