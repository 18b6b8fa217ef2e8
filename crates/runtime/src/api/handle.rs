//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! acting, querying, or streaming events from specific topics.
use std::collections::{BTreeSet, HashMap};

use tokio::sync::{broadcast, mpsc, oneshot};

use skirmish_core::{
    Action, AiReport, ExecutionOutcome, GameState, GameStatus, Position, Side, TurnPhase, UnitId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Cheap summary of where the match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Progress {
    pub status: GameStatus,
    pub phase: TurnPhase,
    pub round: u32,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute one player or enemy unit action.
    ///
    /// Rule rejections come back as [`RuntimeError::Rejected`] and leave the
    /// state untouched.
    pub async fn execute(&self, action: Action) -> Result<ExecutionOutcome> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Mark a unit as the current selection.
    pub async fn select(&self, unit: UnitId) -> Result<()> {
        self.request(|reply| Command::Select { unit, reply }).await?
    }

    /// Forfeit the remaining player actions of this round.
    pub async fn end_player_turn(&self) -> Result<TurnPhase> {
        self.request(|reply| Command::EndPlayerTurn { reply })
            .await?
    }

    /// Let the enemy AI act with every living enemy.
    pub async fn run_enemy_turn(&self) -> Result<Vec<AiReport>> {
        self.request(|reply| Command::RunEnemyTurn { reply })
            .await?
    }

    /// Units of the active side that still owe an action, in roster order.
    pub async fn pending_units(&self) -> Result<Vec<UnitId>> {
        self.request(|reply| Command::PendingUnits { reply }).await
    }

    pub async fn progress(&self) -> Result<Progress> {
        self.request(|reply| Command::Progress { reply }).await
    }

    /// Tiles currently visible to `side`.
    pub async fn visible_tiles(&self, side: Side) -> Result<BTreeSet<Position>> {
        self.request(|reply| Command::VisibleTiles { side, reply })
            .await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - executed and rejected actions, enemy reports
    /// - `Topic::Turn` - phase changes and the final outcome
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
