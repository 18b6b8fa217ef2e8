//! Phase bookkeeping: who may act, when the phase flips, when the game ends.

use tracing::{debug, info};

use crate::config::{ControlMode, GameConfig, TurnPolicy};
use crate::state::{GameOutcome, GameState, Side, TurnPhase, UnitClass, UnitId};

use super::GameEngine;

/// Records victory or defeat the first time either side is wiped out.
///
/// Returns the outcome only on the call that decided the game.
pub(super) fn check_outcome(state: &mut GameState) -> Option<GameOutcome> {
    if state.turn.phase.is_over() {
        return None;
    }
    let outcome = if state.roster.is_wiped_out(Side::Enemy) {
        GameOutcome::Victory
    } else if state.roster.is_wiped_out(Side::Player) {
        GameOutcome::Defeat
    } else {
        return None;
    };
    info!(%outcome, round = state.turn.round, "game decided");
    state.turn.begin_phase(TurnPhase::GameOver(outcome));
    Some(outcome)
}

/// The unit a single-unit player may command: first living unit of `class`.
fn commanded_unit(state: &GameState, class: UnitClass) -> Option<UnitId> {
    state
        .roster
        .living(Side::Player)
        .find(|unit| unit.class == class)
        .map(|unit| unit.id)
}

pub(super) fn is_controllable(state: &GameState, config: &GameConfig, unit: UnitId) -> bool {
    match (state.unit(unit).map(|u| u.side), config.control) {
        (Some(Side::Enemy), _) | (Some(Side::Player), ControlMode::Squad) => true,
        (Some(Side::Player), ControlMode::Single(class)) => {
            commanded_unit(state, class) == Some(unit)
        }
        (None, _) => false,
    }
}

/// Living, controllable units of the active side that still owe an action.
pub(super) fn pending_units(state: &GameState, config: &GameConfig) -> Vec<UnitId> {
    let Some(side) = state.turn.phase.active_side() else {
        return Vec::new();
    };
    state
        .roster
        .living(side)
        .map(|unit| unit.id)
        .filter(|&id| !state.turn.has_acted(id) && is_controllable(state, config, id))
        .collect()
}

/// Records that `unit` spent an action under `policy`.
pub(super) fn spend(state: &mut GameState, policy: TurnPolicy, unit: UnitId, was_move: bool) {
    let alive = state.unit(unit).is_some_and(|u| u.is_alive());
    match policy {
        TurnPolicy::MoveThenAct if was_move && alive => state.turn.mark_moved(unit),
        _ => state.turn.mark_acted(unit),
    }
}

/// Flips to the other side once nobody on the active side owes an action.
pub(super) fn advance_if_done(state: &mut GameState, config: &GameConfig) -> Option<TurnPhase> {
    if state.turn.phase.is_over() || !pending_units(state, config).is_empty() {
        return None;
    }
    let next = match state.turn.phase {
        TurnPhase::PlayerTurn => TurnPhase::EnemyTurn,
        TurnPhase::EnemyTurn => {
            state.turn.round += 1;
            TurnPhase::PlayerTurn
        }
        TurnPhase::GameOver(_) => return None,
    };
    debug!(?next, round = state.turn.round, "phase advanced");
    state.turn.begin_phase(next);
    Some(next)
}

impl GameEngine<'_> {
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn round(&self) -> u32 {
        self.state.turn.round
    }

    /// Units that may still act this phase, in roster order.
    pub fn pending_units(&self, config: &GameConfig) -> Vec<UnitId> {
        pending_units(self.state, config)
    }
}
