//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or an automated player.
use std::collections::VecDeque;

use async_trait::async_trait;
use skirmish_core::{Action, GameEnv, GameState, GreedyAi, UnitId};
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};

/// Trait for providing actions based on the current game state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Automated play
/// - Scripted/replayed actions
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `unit`, which currently owes an action.
    ///
    /// `state` is a snapshot; the action is validated again when executed.
    async fn provide_action(
        &self,
        unit: UnitId,
        state: &GameState,
        env: GameEnv<'_>,
    ) -> Result<Action>;
}

/// Always waits. Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(
        &self,
        unit: UnitId,
        _state: &GameState,
        _env: GameEnv<'_>,
    ) -> Result<Action> {
        Ok(Action::wait(unit))
    }
}

/// Plays player units with the same greedy policy the enemy uses: attack the
/// nearest opponent when in range, otherwise step toward it.
pub struct AutoPlayerProvider;

#[async_trait]
impl ActionProvider for AutoPlayerProvider {
    async fn provide_action(
        &self,
        unit: UnitId,
        state: &GameState,
        _env: GameEnv<'_>,
    ) -> Result<Action> {
        let Ok(plan) = GreedyAi::plan(state, unit) else {
            return Ok(Action::wait(unit));
        };
        if plan.in_range {
            return Ok(Action::attack(unit, plan.target));
        }
        match plan.step {
            Some(direction) if !state.turn.has_moved(unit) => {
                let (dx, dy) = direction.delta();
                Ok(Action::move_by(unit, dx, dy))
            }
            _ => Ok(Action::wait(unit)),
        }
    }
}

/// Replays a fixed list of actions in order, regardless of which unit is
/// asked for.
pub struct ScriptedActionProvider {
    script: Mutex<VecDeque<Action>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(
        &self,
        unit: UnitId,
        _state: &GameState,
        _env: GameEnv<'_>,
    ) -> Result<Action> {
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted { unit })
    }
}
