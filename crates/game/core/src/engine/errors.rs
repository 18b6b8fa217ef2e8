//! Error types for the execution pipeline and turn control.

use crate::action::{AbilityError, AttackError, MoveError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameOutcome, Side, TurnPhase, UnitId};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
///
/// Every variant leaves the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),

    #[error("ability action failed: {0}")]
    Ability(TransitionPhaseError<AbilityError>),

    #[error("the game is over ({0})")]
    GameOver(GameOutcome),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is dead")]
    Dead(UnitId),

    #[error("unit {unit} belongs to the {side} side, which is not active")]
    NotYourTurn { unit: UnitId, side: Side },

    #[error("unit {0} is not under player control")]
    NotControllable(UnitId),

    #[error("unit {0} has already acted this turn")]
    AlreadyActed(UnitId),

    #[error("unit {0} has already moved this turn")]
    AlreadyMoved(UnitId),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(err) => err.error.severity(),
            Self::Attack(err) => err.error.severity(),
            Self::Ability(err) => err.error.severity(),
            Self::Dead(_) | Self::AlreadyMoved(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(err) => err.error.error_code(),
            Self::Attack(err) => err.error.error_code(),
            Self::Ability(err) => err.error.error_code(),
            Self::GameOver(_) => "EXECUTE_GAME_OVER",
            Self::UnitNotFound(_) => "EXECUTE_UNIT_NOT_FOUND",
            Self::Dead(_) => "EXECUTE_DEAD",
            Self::NotYourTurn { .. } => "EXECUTE_NOT_YOUR_TURN",
            Self::NotControllable(_) => "EXECUTE_NOT_CONTROLLABLE",
            Self::AlreadyActed(_) => "EXECUTE_ALREADY_ACTED",
            Self::AlreadyMoved(_) => "EXECUTE_ALREADY_MOVED",
        }
    }
}

/// Errors from phase-level operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("expected phase {expected:?}, but the game is in {actual:?}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "TURN_WRONG_PHASE"
    }
}
