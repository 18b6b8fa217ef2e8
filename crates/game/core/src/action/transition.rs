use crate::env::GameEnv;
use crate::state::{GameState, UnitId};

/// Defines how a concrete action mutates game state.
///
/// The engine runs the three hooks in order and stops at the first error.
/// `pre_validate` must reject everything that would leave a partial mutation
/// behind, so a failed action never changes the state.
pub trait ActionTransition {
    type Error;
    type Result;

    fn actor(&self) -> UnitId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Assumes `pre_validate` succeeded.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
