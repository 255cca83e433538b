mod board;
mod common;
mod config;
mod game;
mod geometry;
mod logging;
mod monitor;
mod player;
mod tactics;
pub mod ui;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use geometry::*;
pub use logging::init_logging;
pub use monitor::*;
pub use player::*;
pub use tactics::*;
