//! Action transition dispatch and execution logic.

use crate::action::{
    AbilityAction, Action, ActionKind, ActionResult, ActionTransition, AttackAction, MoveAction,
};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs `pre_validate`, `apply` and `post_validate` in order.
#[inline]
pub fn drive<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action kind to its transition and wraps the result.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action.kind {
        ActionKind::Move { dx, dy } => {
            let report = drive(&MoveAction::new(action.actor, dx, dy), state, env)
                .map_err(ExecuteError::Move)?;
            Ok(ActionResult::Moved(report))
        }
        ActionKind::Attack { target } => {
            let result = drive(&AttackAction::new(action.actor, target), state, env)
                .map_err(ExecuteError::Attack)?;
            Ok(ActionResult::Attacked { target, result })
        }
        ActionKind::Ability { slot, target } => {
            let report = drive(&AbilityAction::new(action.actor, slot, target), state, env)
                .map_err(ExecuteError::Ability)?;
            Ok(ActionResult::Ability(report))
        }
        ActionKind::Wait => Ok(ActionResult::Waited),
    }
}
