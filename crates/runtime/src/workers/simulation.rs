//! Simulation worker that owns the authoritative [`GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! through [`GameEngine`], and publishes events to the [`EventBus`].

use std::collections::BTreeSet;

use tokio::sync::{mpsc, oneshot};

use skirmish_core::{
    Action, AiReport, ExecutionOutcome, GameEngine, GameError, GameState, Position, Side,
    TurnPhase, UnitId,
};
use tracing::{debug, info, warn};

use crate::api::{Progress, Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, TurnEvent};
use crate::oracle::OracleBundle;

/// Commands that can be sent to the simulation worker
pub enum Command {
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    Select {
        unit: UnitId,
        reply: oneshot::Sender<Result<()>>,
    },
    EndPlayerTurn {
        reply: oneshot::Sender<Result<TurnPhase>>,
    },
    RunEnemyTurn {
        reply: oneshot::Sender<Result<Vec<AiReport>>>,
    },
    PendingUnits {
        reply: oneshot::Sender<Vec<UnitId>>,
    },
    Progress {
        reply: oneshot::Sender<Progress>,
    },
    VisibleTiles {
        side: Side,
        reply: oneshot::Sender<BTreeSet<Position>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes gameplay commands.
///
/// The worker is the only owner of the state; every mutation goes through
/// the engine so turn gating and game-over checks always apply.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleBundle,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        oracles: OracleBundle,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            players = state.roster.side(Side::Player).len(),
            enemies = state.roster.side(Side::Enemy).len(),
            seed = state.game_seed,
            "simulation worker initialized"
        );

        Self {
            state,
            oracles,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        debug!("simulation worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Execute { action, reply } => {
                let result = self.execute(action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::Select { unit, reply } => {
                let env = self.oracles.as_game_env();
                let result = GameEngine::new(&mut self.state)
                    .select(env, unit)
                    .map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("Select reply channel closed (caller dropped)");
                }
            }
            Command::EndPlayerTurn { reply } => {
                let result = self.end_player_turn();
                if reply.send(result).is_err() {
                    debug!("EndPlayerTurn reply channel closed (caller dropped)");
                }
            }
            Command::RunEnemyTurn { reply } => {
                let result = self.run_enemy_turn();
                if reply.send(result).is_err() {
                    debug!("RunEnemyTurn reply channel closed (caller dropped)");
                }
            }
            Command::PendingUnits { reply } => {
                let config = *self.oracles.config();
                let pending = GameEngine::new(&mut self.state).pending_units(&config);
                if reply.send(pending).is_err() {
                    debug!("PendingUnits reply channel closed (caller dropped)");
                }
            }
            Command::Progress { reply } => {
                if reply.send(self.progress()).is_err() {
                    debug!("Progress reply channel closed (caller dropped)");
                }
            }
            Command::VisibleTiles { side, reply } => {
                let visible = self
                    .state
                    .visible_tiles(side, self.oracles.config().vision_radius);
                if reply.send(visible).is_err() {
                    debug!("VisibleTiles reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn progress(&self) -> Progress {
        Progress {
            status: self.state.status(),
            phase: self.state.turn.phase,
            round: self.state.turn.round,
        }
    }

    fn execute(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let before = self.progress();
        let nonce = self.state.turn.nonce;
        let env = self.oracles.as_game_env();

        let result = GameEngine::new(&mut self.state).execute(env, &action);
        match result {
            Ok(outcome) => {
                debug!(actor = %action.actor, result = ?outcome.action_result, "action executed");
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionExecuted {
                        nonce,
                        action,
                        result: outcome.action_result.clone(),
                        status: outcome.status,
                    }));
                self.publish_turn_change(before);
                Ok(outcome)
            }
            Err(error) => {
                warn!(
                    actor = %action.actor,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "action rejected"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionRejected {
                        action,
                        code: error.error_code().to_string(),
                        error: error.to_string(),
                    }));
                Err(error.into())
            }
        }
    }

    fn end_player_turn(&mut self) -> Result<TurnPhase> {
        let before = self.progress();
        let env = self.oracles.as_game_env();
        let phase = GameEngine::new(&mut self.state).end_player_turn(env)?;
        self.publish_turn_change(before);
        Ok(phase)
    }

    fn run_enemy_turn(&mut self) -> Result<Vec<AiReport>> {
        let before = self.progress();
        let env = self.oracles.as_game_env();
        let reports = GameEngine::new(&mut self.state).play_enemy_turn(env)?;

        for report in &reports {
            self.event_bus
                .publish(Event::GameState(GameStateEvent::EnemyActed { report: *report }));
        }
        debug!(units = reports.len(), "enemy turn resolved");
        self.publish_turn_change(before);
        Ok(reports)
    }

    /// Announces a phase or round change. The engine enters `GameOver` once,
    /// so the outcome event fires once.
    fn publish_turn_change(&self, before: Progress) {
        let after = self.progress();
        if (after.phase, after.round) == (before.phase, before.round) {
            return;
        }
        let event = match after.phase {
            TurnPhase::GameOver(outcome) => {
                info!(%outcome, round = after.round, "match over");
                TurnEvent::GameOver {
                    outcome,
                    round: after.round,
                }
            }
            phase => {
                debug!(?phase, round = after.round, "turn changed");
                TurnEvent::PhaseChanged {
                    phase,
                    round: after.round,
                }
            }
        };
        self.event_bus.publish(Event::Turn(event));
    }
}
