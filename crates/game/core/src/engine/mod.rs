//! Turn controller and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! gates actions by phase, control mode and turn policy, runs the transition
//! phases, and checks for game over after every individual unit action.

mod errors;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError, TurnError};
pub use transition::drive;

use tracing::debug;

use crate::action::{Action, ActionResult, AttackAction, MoveAction};
use crate::ai::{AiError, AiReport, AiStep, AiStrike, GreedyAi};
use crate::env::GameEnv;
use crate::state::{GameOutcome, GameState, GameStatus, Side, TurnPhase, UnitId};

/// Complete outcome of one executed action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    pub action_result: ActionResult,
    pub status: GameStatus,
    /// Phase after the action, including any automatic advance.
    pub phase: TurnPhase,
    /// Set only on the action that decided the game.
    pub decided: Option<GameOutcome>,
}

/// Game engine that manages action execution and turn control.
///
/// All turn-gated mutation flows through the three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Executes one unit action. Rejections leave the state unchanged.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let config = env.config();
        self.validate_actor(env, action)?;

        let action_result = transition::execute_transition(action, self.state, &env)?;
        self.state.turn.nonce += 1;

        turns::spend(self.state, config.turn_policy, action.actor, action.is_move());
        let decided = turns::check_outcome(self.state);
        if decided.is_none() {
            turns::advance_if_done(self.state, config);
        }

        Ok(ExecutionOutcome {
            action_result,
            status: self.state.status(),
            phase: self.state.turn.phase,
            decided,
        })
    }

    /// Marks `unit` as the presentation's current selection.
    pub fn select(&mut self, env: GameEnv<'_>, unit: UnitId) -> Result<(), ExecuteError> {
        self.validate_actor(env, &Action::wait(unit))?;
        self.state.turn.selected = Some(unit);
        Ok(())
    }

    /// Forfeits every remaining player action and hands over to the enemy.
    pub fn end_player_turn(&mut self, env: GameEnv<'_>) -> Result<TurnPhase, TurnError> {
        self.expect_phase(TurnPhase::PlayerTurn)?;
        for unit in turns::pending_units(self.state, env.config()) {
            self.state.turn.mark_acted(unit);
        }
        turns::advance_if_done(self.state, env.config());
        Ok(self.state.turn.phase)
    }

    /// Runs the AI once for every living enemy, in roster order.
    pub fn play_enemy_turn(&mut self, env: GameEnv<'_>) -> Result<Vec<AiReport>, TurnError> {
        self.expect_phase(TurnPhase::EnemyTurn)?;
        let enemies: Vec<UnitId> = self
            .state
            .roster
            .side(Side::Enemy)
            .iter()
            .map(|unit| unit.id)
            .collect();

        let mut reports = Vec::with_capacity(enemies.len());
        for unit in enemies {
            if self.state.turn.phase.is_over() {
                break;
            }
            let alive = self.state.unit(unit).is_some_and(|u| u.is_alive());
            if !alive || self.state.turn.has_acted(unit) {
                continue;
            }
            reports.push(self.run_ai(env, unit));
            self.state.turn.mark_acted(unit);
        }

        // Back to the player; skip straight through if nobody there can act.
        if turns::advance_if_done(self.state, env.config()) == Some(TurnPhase::PlayerTurn) {
            turns::advance_if_done(self.state, env.config());
        }
        Ok(reports)
    }

    /// One AI unit turn: optional step, then optional attack, with a game-over
    /// check after each sub-action.
    fn run_ai(&mut self, env: GameEnv<'_>, unit: UnitId) -> AiReport {
        let plan = match GreedyAi::plan(self.state, unit) {
            Ok(plan) => plan,
            Err(error) => {
                debug!(%unit, %error, "ai skipped unit");
                return AiReport::skipped(unit, error);
            }
        };
        let mut report = AiReport {
            unit,
            target: Ok(plan.target),
            step: None,
            strike: None,
        };

        report.step = Some(match plan.step {
            _ if plan.in_range => AiStep::Held,
            None => AiStep::NoOpening,
            Some(direction) => match drive(&MoveAction::step(unit, direction), self.state, &env) {
                Ok(moved) => {
                    self.state.turn.nonce += 1;
                    AiStep::Moved(moved)
                }
                Err(err) => AiStep::Rejected(err.error),
            },
        });
        if turns::check_outcome(self.state).is_some() {
            return report;
        }

        let (actor_alive, in_range) = match (self.state.unit(unit), self.state.unit(plan.target)) {
            (Some(actor), Some(target)) => (
                actor.is_alive(),
                target.is_alive() && actor.position.manhattan(target.position) <= actor.attack_range,
            ),
            _ => (false, false),
        };
        if !actor_alive {
            report.target = Err(AiError::Dead(unit));
            return report;
        }

        report.strike = Some(if !in_range {
            AiStrike::OutOfReach
        } else {
            match drive(&AttackAction::new(unit, plan.target), self.state, &env) {
                Ok(result) => {
                    self.state.turn.nonce += 1;
                    AiStrike::Resolved(result)
                }
                Err(err) => AiStrike::Rejected(err.error),
            }
        });
        turns::check_outcome(self.state);
        report
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), TurnError> {
        let actual = self.state.turn.phase;
        if actual != expected {
            return Err(TurnError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    /// Validates that `action.actor` may act right now.
    fn validate_actor(&self, env: GameEnv<'_>, action: &Action) -> Result<(), ExecuteError> {
        let turn = &self.state.turn;
        let active_side = match turn.phase {
            TurnPhase::GameOver(outcome) => return Err(ExecuteError::GameOver(outcome)),
            phase => phase.active_side(),
        };

        let unit = self
            .state
            .unit(action.actor)
            .ok_or(ExecuteError::UnitNotFound(action.actor))?;
        if !unit.is_alive() {
            return Err(ExecuteError::Dead(unit.id));
        }
        if Some(unit.side) != active_side {
            return Err(ExecuteError::NotYourTurn {
                unit: unit.id,
                side: unit.side,
            });
        }
        if !turns::is_controllable(self.state, env.config(), unit.id) {
            return Err(ExecuteError::NotControllable(unit.id));
        }
        if turn.has_acted(unit.id) {
            return Err(ExecuteError::AlreadyActed(unit.id));
        }
        if action.is_move() && turn.has_moved(unit.id) {
            return Err(ExecuteError::AlreadyMoved(unit.id));
        }
        Ok(())
    }
}
