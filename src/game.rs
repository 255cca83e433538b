//! The match referee: placement ordering, turn alternation, win detection
//! and clean teardown of both player actors.
//!
//! The referee performs no gameplay logic itself. It issues one signal at a
//! time and waits for the acknowledgement before issuing the next, which is
//! what upholds the turn-exclusivity invariant: a second player can never be
//! in an active phase while the first one's signal is still unresolved.

use std::sync::Arc;

use anyhow::ensure;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::common::ConfigError;
use crate::config::GameConfig;
use crate::monitor::ActivityMonitor;
use crate::player::{spawn_pair, PlayerHandle, PlayerSnapshot, TurnReport};
use crate::tactics::Tactician;

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Referee state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Setup,
    Placement(Side),
    Turn(Side),
    Finished,
}

/// One resolved turn as seen by the referee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub side: Side,
    pub attacker: String,
    pub report: TurnReport,
}

/// Everything a presentation layer needs after the match: the winner, the
/// full turn log and both players' final views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub winner: Side,
    pub winner_name: String,
    pub turns: Vec<TurnRecord>,
    pub players: [PlayerSnapshot; 2],
}

/// A running match over two player actors.
pub struct Match {
    handles: [PlayerHandle; 2],
    tasks: Vec<JoinHandle<anyhow::Result<()>>>,
    monitor: Arc<ActivityMonitor>,
    state: MatchState,
    winner: Option<Side>,
    finished_tx: watch::Sender<bool>,
    finished_rx: watch::Receiver<bool>,
}

impl Match {
    /// Validate the configuration and spawn both player actors. The players
    /// park on their command channels until [`Match::run`] signals them.
    pub fn new(
        config: &GameConfig,
        tactician1: Box<dyn Tactician>,
        tactician2: Box<dyn Tactician>,
    ) -> Result<Self, ConfigError> {
        let monitor = ActivityMonitor::new();
        let (p1, p2) = spawn_pair(config, tactician1, tactician2, Arc::clone(&monitor))?;
        let (finished_tx, finished_rx) = watch::channel(false);
        Ok(Self {
            handles: [p1.handle, p2.handle],
            tasks: vec![p1.task, p2.task],
            monitor,
            state: MatchState::Setup,
            winner: None,
            finished_tx,
            finished_rx,
        })
    }

    fn handle(&self, side: Side) -> &PlayerHandle {
        &self.handles[side.index()]
    }

    /// Shared exclusivity instrumentation for this match.
    pub fn monitor(&self) -> Arc<ActivityMonitor> {
        Arc::clone(&self.monitor)
    }

    /// Current referee state.
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Whether the match has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        *self.finished_rx.borrow()
    }

    /// Subscribe to completion; the channel flips to `true` once the match
    /// is finished.
    pub fn subscribe_finished(&self) -> watch::Receiver<bool> {
        self.finished_rx.clone()
    }

    /// The winning side, available only once the match is finished.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Live view of one player: its own board, attack log and hit points.
    /// Usable while the actors are running; once [`Match::run`] has torn
    /// them down, the final views are carried by the [`MatchReport`].
    pub async fn player_snapshot(&self, side: Side) -> anyhow::Result<PlayerSnapshot> {
        self.handle(side).snapshot().await
    }

    /// Drive the match to completion: placement of player 1, placement of
    /// player 2, then strictly alternating turns starting with player 1.
    /// The first attack that drops a defender to zero hit points ends the
    /// match; both actors are then shut down and joined before the report
    /// is returned.
    pub async fn run(&mut self) -> anyhow::Result<MatchReport> {
        ensure!(self.state == MatchState::Setup, "match already run");

        // placement strictly precedes any attack
        for side in [Side::One, Side::Two] {
            self.state = MatchState::Placement(side);
            let report = self.handle(side).begin_placement().await?;
            log::info!(
                "{}: fleet placed, {} hit points",
                self.handle(side).name(),
                report.hit_points
            );
        }

        let mut turns = Vec::new();
        let mut side = Side::One;
        let winner = loop {
            self.state = MatchState::Turn(side);
            let report = self.handle(side).take_turn().await?;
            turns.push(TurnRecord {
                side,
                attacker: self.handle(side).name().to_string(),
                report,
            });
            // only one board was mutated this turn, so only the current
            // defender can have reached zero
            if report.defender_hit_points == 0 {
                break side;
            }
            side = side.flip();
        };

        self.winner = Some(winner);
        self.state = MatchState::Finished;
        let _ = self.finished_tx.send(true);
        log::info!(
            "match finished after {} turns, winner {}",
            turns.len(),
            self.handle(winner).name()
        );

        let players = [
            self.handle(Side::One).snapshot().await?,
            self.handle(Side::Two).snapshot().await?,
        ];

        // tear both actors down and join them; nobody is left waiting on a
        // signal that never comes
        for handle in &self.handles {
            handle.shutdown().await?;
        }
        for task in self.tasks.drain(..) {
            task.await??;
        }

        Ok(MatchReport {
            winner,
            winner_name: self.handle(winner).name().to_string(),
            turns,
            players,
        })
    }
}
