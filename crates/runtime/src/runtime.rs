//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel and
//! event bus, and drives a match with a player [`ActionProvider`] and the
//! built-in enemy AI.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use skirmish_core::{Action, GameOutcome, GameState, GameStatus, TurnPhase, UnitId};

use crate::api::{ActionProvider, Progress, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleBundle;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Consecutive rejected provider actions before the unit is made to wait.
    pub rejection_limit: u32,
    /// [`Runtime::run`] gives up once this round is exceeded.
    pub max_rounds: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            rejection_limit: 3,
            max_rounds: Some(200),
        }
    }
}

/// Main runtime that orchestrates a match.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    oracles: OracleBundle,
    config: RuntimeConfig,
    player_provider: Option<Box<dyn ActionProvider>>,
    rejections: u32,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Advances the match by one unit of work: a single player action, or a
    /// whole enemy turn.
    pub async fn step(&mut self) -> Result<Progress> {
        let progress = self.handle.progress().await?;
        match progress.phase {
            TurnPhase::GameOver(_) => return Ok(progress),
            TurnPhase::EnemyTurn => {
                self.handle.run_enemy_turn().await?;
            }
            TurnPhase::PlayerTurn => self.player_step().await?,
        }
        self.handle.progress().await
    }

    async fn player_step(&mut self) -> Result<()> {
        let provider = self
            .player_provider
            .as_deref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let pending = self.handle.pending_units().await?;
        let Some(&unit) = pending.first() else {
            self.handle.end_player_turn().await?;
            return Ok(());
        };

        let state = self.handle.query_state().await?;
        let action = provider
            .provide_action(unit, &state, self.oracles.as_game_env())
            .await?;

        match self.handle.execute(action).await {
            Ok(_) => {
                self.rejections = 0;
                Ok(())
            }
            Err(RuntimeError::Rejected(error)) => {
                self.rejections += 1;
                warn!(%unit, %error, rejections = self.rejections, "provider action rejected");
                if self.rejections >= self.config.rejection_limit {
                    self.rejections = 0;
                    self.force_wait(unit).await?;
                }
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    async fn force_wait(&self, unit: UnitId) -> Result<()> {
        debug!(%unit, "rejection limit reached, waiting");
        self.handle.execute(Action::wait(unit)).await.map(|_| ())
    }

    /// Runs until one side is wiped out.
    pub async fn run(&mut self) -> Result<GameOutcome> {
        loop {
            let progress = self.step().await?;
            if let Some(outcome) = progress.status.outcome() {
                info!(%outcome, round = progress.round, "match finished");
                return Ok(outcome);
            }
            if let Some(limit) = self.config.max_rounds
                && progress.round > limit
            {
                return Err(RuntimeError::RoundLimit { rounds: limit });
            }
        }
    }

    pub async fn status(&self) -> Result<GameStatus> {
        Ok(self.handle.progress().await?.status)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<GameState> {
        let state = self.handle.query_state().await?;
        drop(self.handle);
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        Ok(state)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: OracleBundle,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: OracleBundle::default(),
            player_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = oracles;
        self
    }

    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Spawns the simulation worker. Must be called inside a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(state, self.oracles.clone(), command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        Ok(Runtime {
            handle,
            oracles: self.oracles,
            config: self.config,
            player_provider: self.player_provider,
            rejections: 0,
            sim_worker_handle,
        })
    }
}
