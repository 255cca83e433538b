//! The player actor: one independently scheduled task per player.
//!
//! A player owns its board, its remaining hit points and the set of
//! coordinates it has fired at. It suspends on its command channel and acts
//! only when the referee signals it; the opponent's board is reached solely
//! through the [`PlayerHandle::receive_attack`] entry point. Commands that
//! arrive in the wrong phase are contract violations and stop the actor
//! loudly instead of being ignored.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{anyhow, bail, ensure};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::board::{Board, BoardSnapshot};
use crate::common::{AttackOutcome, ConfigError};
use crate::config::{GameConfig, MAX_SHIP_LEN, MIN_SHIP_LEN};
use crate::geometry::Coord;
use crate::monitor::ActivityMonitor;
use crate::tactics::Tactician;

/// Proposals accepted from a tactician before the actor gives up and
/// reports a defect.
const MAX_PROPOSALS: usize = 100;

/// Lifecycle of a player actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    WaitingToInitialize,
    Placing,
    WaitingForTurn,
    Attacking,
    Done,
}

/// Outcome of a completed placement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub ships_placed: u32,
    /// Hit points after placement: the number of occupied cells.
    pub hit_points: u32,
}

/// Outcome of one resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub target: Coord,
    pub outcome: AttackOutcome,
    /// Defender's hit points after this attack resolved.
    pub defender_hit_points: u32,
}

/// Reply to a single attack delivered to this player's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReply {
    pub outcome: AttackOutcome,
    /// This player's hit points after the attack.
    pub hit_points: u32,
}

/// One attack this player has made, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub target: Coord,
    pub outcome: AttackOutcome,
}

/// Read-only view of one player for rendering. Contains only what this
/// player may legitimately see: its own board and its own attack history,
/// never the opponent's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub board: BoardSnapshot,
    pub attacks: Vec<AttackRecord>,
    pub hit_points: u32,
}

enum Command {
    BeginPlacement {
        done: oneshot::Sender<PlacementReport>,
    },
    TakeTurn {
        done: oneshot::Sender<TurnReport>,
    },
    ReceiveAttack {
        target: Coord,
        reply: oneshot::Sender<AttackReply>,
    },
    Snapshot {
        reply: oneshot::Sender<PlayerSnapshot>,
    },
    Shutdown {
        done: oneshot::Sender<()>,
    },
}

/// Handle to a spawned player actor. Cloneable; the referee holds one per
/// player. Actors reach each other only through weak handles, so dropping
/// the referee's handles lets both tasks wind down instead of keeping each
/// other's channel alive forever.
#[derive(Clone)]
pub struct PlayerHandle {
    name: String,
    tx: mpsc::Sender<Command>,
}

/// Weak counterpart of [`PlayerHandle`]; holding one does not keep the
/// player's command channel open.
struct WeakPlayerHandle {
    name: String,
    tx: mpsc::WeakSender<Command>,
}

impl WeakPlayerHandle {
    fn upgrade(&self) -> Option<PlayerHandle> {
        self.tx.upgrade().map(|tx| PlayerHandle {
            name: self.name.clone(),
            tx,
        })
    }
}

impl PlayerHandle {
    /// Display name of the player behind this handle.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn downgrade(&self) -> WeakPlayerHandle {
        WeakPlayerHandle {
            name: self.name.clone(),
            tx: self.tx.downgrade(),
        }
    }

    async fn request<T>(
        &self,
        cmd: Command,
        rx: oneshot::Receiver<T>,
    ) -> anyhow::Result<T> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("player {} has terminated", self.name))?;
        rx.await
            .map_err(|_| anyhow!("player {} rejected the request", self.name))
    }

    /// Signal the player to place its whole fleet; resolves when every
    /// configured ship is on the board.
    pub async fn begin_placement(&self) -> anyhow::Result<PlacementReport> {
        let (done, rx) = oneshot::channel();
        self.request(Command::BeginPlacement { done }, rx).await
    }

    /// Grant the player its turn; resolves when exactly one attack has
    /// resolved against the opponent.
    pub async fn take_turn(&self) -> anyhow::Result<TurnReport> {
        let (done, rx) = oneshot::channel();
        self.request(Command::TakeTurn { done }, rx).await
    }

    /// Deliver an attack to this player's board. The sole cross-ownership
    /// mutation path in the system.
    pub async fn receive_attack(&self, target: Coord) -> anyhow::Result<AttackReply> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::ReceiveAttack { target, reply }, rx).await
    }

    /// Read-only view of this player's own state.
    pub async fn snapshot(&self) -> anyhow::Result<PlayerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Snapshot { reply }, rx).await
    }

    /// Ask the player to terminate and wait for the acknowledgement.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        let (done, rx) = oneshot::channel();
        self.request(Command::Shutdown { done }, rx).await
    }
}

/// A spawned player: its handle plus the task to join after shutdown.
pub struct PlayerTask {
    pub handle: PlayerHandle,
    pub task: JoinHandle<anyhow::Result<()>>,
}

/// Spawn the two player actors for one match, wired to each other and to
/// the shared activity monitor. Validates the configuration first.
pub fn spawn_pair(
    config: &GameConfig,
    tactician1: Box<dyn Tactician>,
    tactician2: Box<dyn Tactician>,
    monitor: Arc<ActivityMonitor>,
) -> Result<(PlayerTask, PlayerTask), ConfigError> {
    let geometry = config.validate()?;
    let (tx1, rx1) = mpsc::channel(8);
    let (tx2, rx2) = mpsc::channel(8);
    let handle1 = PlayerHandle {
        name: config.player_names[0].clone(),
        tx: tx1,
    };
    let handle2 = PlayerHandle {
        name: config.player_names[1].clone(),
        tx: tx2,
    };
    let actor1 = PlayerActor::new(
        handle1.name.clone(),
        Board::new(geometry, config.fleet),
        tactician1,
        handle2.downgrade(),
        Arc::clone(&monitor),
    );
    let actor2 = PlayerActor::new(
        handle2.name.clone(),
        Board::new(geometry, config.fleet),
        tactician2,
        handle1.downgrade(),
        monitor,
    );
    let task1 = tokio::spawn(actor1.run(rx1));
    let task2 = tokio::spawn(actor2.run(rx2));
    Ok((
        PlayerTask {
            handle: handle1,
            task: task1,
        },
        PlayerTask {
            handle: handle2,
            task: task2,
        },
    ))
}

struct PlayerActor {
    name: String,
    board: Board,
    tactician: Box<dyn Tactician>,
    opponent: WeakPlayerHandle,
    monitor: Arc<ActivityMonitor>,
    phase: PlayerPhase,
    hit_points: u32,
    attacked: HashSet<Coord>,
    attack_log: Vec<AttackRecord>,
}

impl PlayerActor {
    fn new(
        name: String,
        board: Board,
        tactician: Box<dyn Tactician>,
        opponent: WeakPlayerHandle,
        monitor: Arc<ActivityMonitor>,
    ) -> Self {
        Self {
            name,
            board,
            tactician,
            opponent,
            monitor,
            phase: PlayerPhase::WaitingToInitialize,
            hit_points: 0,
            attacked: HashSet::new(),
            attack_log: Vec::new(),
        }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>) -> anyhow::Result<()> {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                Command::BeginPlacement { done } => {
                    ensure!(
                        self.phase == PlayerPhase::WaitingToInitialize,
                        "{}: placement signalled in phase {:?}",
                        self.name,
                        self.phase
                    );
                    self.phase = PlayerPhase::Placing;
                    let report = {
                        let _active = self.monitor.activate();
                        self.place_fleet()?
                    };
                    self.phase = PlayerPhase::WaitingForTurn;
                    let _ = done.send(report);
                }
                Command::TakeTurn { done } => {
                    ensure!(
                        self.phase == PlayerPhase::WaitingForTurn,
                        "{}: turn granted in phase {:?}",
                        self.name,
                        self.phase
                    );
                    self.phase = PlayerPhase::Attacking;
                    let report = {
                        let _active = self.monitor.activate();
                        self.attack_once().await?
                    };
                    self.phase = PlayerPhase::WaitingForTurn;
                    let _ = done.send(report);
                }
                Command::ReceiveAttack { target, reply } => {
                    ensure!(
                        self.phase == PlayerPhase::WaitingForTurn,
                        "{}: attacked in phase {:?}",
                        self.name,
                        self.phase
                    );
                    let outcome = match self.board.receive_attack(target) {
                        Ok(outcome) => outcome,
                        Err(_) => bail!(
                            "{}: attacked at {} which is off the board",
                            self.name,
                            target
                        ),
                    };
                    if outcome == AttackOutcome::Hit {
                        self.hit_points -= 1;
                    }
                    log::info!(
                        "{} takes fire at {}: {:?} ({} hit points left)",
                        self.name,
                        target,
                        outcome,
                        self.hit_points
                    );
                    let _ = reply.send(AttackReply {
                        outcome,
                        hit_points: self.hit_points,
                    });
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(PlayerSnapshot {
                        name: self.name.clone(),
                        board: self.board.snapshot(),
                        attacks: self.attack_log.clone(),
                        hit_points: self.hit_points,
                    });
                }
                Command::Shutdown { done } => {
                    self.phase = PlayerPhase::Done;
                    log::debug!("{} shutting down", self.name);
                    let _ = done.send(());
                    break;
                }
            }
        }
        Ok(())
    }

    /// Place every configured ship, longest first, asking the tactician
    /// again whenever a proposal fails validation.
    fn place_fleet(&mut self) -> anyhow::Result<PlacementReport> {
        let geometry = self.board.geometry();
        let mut ships_placed = 0;
        for len in (MIN_SHIP_LEN..=MAX_SHIP_LEN).rev() {
            while self.board.remaining(len) > 0 {
                let mut placed = false;
                for _ in 0..MAX_PROPOSALS {
                    let run =
                        self.tactician
                            .propose_ship(&geometry, len, &self.board.snapshot());
                    match self.board.place(&run) {
                        Ok(()) => {
                            placed = true;
                            break;
                        }
                        Err(err) => {
                            log::debug!("{}: placement rejected: {}", self.name, err);
                            self.tactician.placement_rejected(&run, err);
                        }
                    }
                }
                ensure!(
                    placed,
                    "{}: unable to place a {}-cell ship after {} proposals",
                    self.name,
                    len,
                    MAX_PROPOSALS
                );
                ships_placed += 1;
            }
        }
        self.hit_points = self.board.intact_cells();
        log::info!(
            "{} placed {} ships ({} hit points)",
            self.name,
            ships_placed,
            self.hit_points
        );
        Ok(PlacementReport {
            ships_placed,
            hit_points: self.hit_points,
        })
    }

    /// Resolve exactly one attack against the opponent. Repeat targets are
    /// rejected before they reach the opponent and the tactician is asked
    /// again; the chosen coordinate is recorded even on a miss.
    async fn attack_once(&mut self) -> anyhow::Result<TurnReport> {
        let geometry = self.board.geometry();
        let opponent = self.opponent.upgrade().ok_or_else(|| {
            anyhow!("{}: opponent {} has terminated", self.name, self.opponent.name)
        })?;
        for _ in 0..MAX_PROPOSALS {
            let target = self.tactician.select_target(&geometry, &self.attacked);
            if self.attacked.contains(&target) {
                log::debug!("{}: {} already attacked, reselecting", self.name, target);
                self.tactician.target_rejected(target);
                continue;
            }
            let reply = opponent.receive_attack(target).await?;
            self.attacked.insert(target);
            self.attack_log.push(AttackRecord {
                target,
                outcome: reply.outcome,
            });
            log::info!("{} fires at {}: {:?}", self.name, target, reply.outcome);
            return Ok(TurnReport {
                target,
                outcome: reply.outcome,
                defender_hit_points: reply.hit_points,
            });
        }
        bail!(
            "{}: no fresh target after {} proposals",
            self.name,
            MAX_PROPOSALS
        )
    }
}
