//! Greedy opponent AI.
//!
//! For each unit: pick the nearest living opponent, take one cardinal step
//! toward it unless it is already within attack range, then attack if the
//! target ends up in range. No path planning, no fog of war.
//!
//! The planner only reads state. The engine applies the plan through the
//! regular movement and attack transitions so terrain and combat rules hold.

pub mod generator;
pub mod targeting;

pub use generator::{choose_step, step_candidates};
pub use targeting::select_target;

use tracing::debug;

use crate::action::{AttackError, CardinalDirection, MoveError, MoveReport};
use crate::combat::AttackResult;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is dead")]
    Dead(UnitId),

    #[error("no living opponent for {0}")]
    NoValidTarget(UnitId),
}

impl GameError for AiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) => ErrorSeverity::Validation,
            Self::Dead(_) | Self::NoValidTarget(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "AI_UNIT_NOT_FOUND",
            Self::Dead(_) => "AI_DEAD",
            Self::NoValidTarget(_) => "AI_NO_VALID_TARGET",
        }
    }
}

/// What the AI intends to do with one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiPlan {
    pub unit: UnitId,
    pub target: UnitId,
    /// `None` when already in range or when every step is closed.
    pub step: Option<CardinalDirection>,
    pub in_range: bool,
}

/// How the movement sub-action went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiStep {
    /// Already within attack range; no move attempted.
    Held,
    Moved(MoveReport),
    /// Every candidate step was closed.
    NoOpening,
    Rejected(MoveError),
}

/// How the attack sub-action went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiStrike {
    OutOfReach,
    Resolved(AttackResult),
    Rejected(AttackError),
}

/// Record of one AI-controlled unit's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiReport {
    pub unit: UnitId,
    pub target: Result<UnitId, AiError>,
    pub step: Option<AiStep>,
    pub strike: Option<AiStrike>,
}

impl AiReport {
    pub fn skipped(unit: UnitId, error: AiError) -> Self {
        Self {
            unit,
            target: Err(error),
            step: None,
            strike: None,
        }
    }
}

/// Stateless planner; see the module docs.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAi;

impl GreedyAi {
    pub fn plan(state: &GameState, unit: UnitId) -> Result<AiPlan, AiError> {
        let actor = state.unit(unit).ok_or(AiError::UnitNotFound(unit))?;
        if !actor.is_alive() {
            return Err(AiError::Dead(unit));
        }
        let target = select_target(state, actor).ok_or(AiError::NoValidTarget(unit))?;

        let in_range = actor.position.manhattan(target.position) <= actor.attack_range;
        let step = if in_range {
            None
        } else {
            choose_step(state, actor, target)
        };

        debug!(
            unit = %unit,
            target = %target.id,
            in_range,
            step = ?step,
            "planned ai turn"
        );

        Ok(AiPlan {
            unit,
            target: target.id,
            step,
            in_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClassOracle, StandardClasses};
    use crate::state::{MapDimensions, Position, Roster, Side, TileMap, UnitClass};

    #[test]
    fn picks_the_nearer_of_two_players() {
        let mut roster = Roster::new();
        let profile = StandardClasses.profile(UnitClass::Medic);
        roster.spawn(UnitClass::Medic, Side::Player, Position::new(0, 5), &profile);
        roster.spawn(UnitClass::Medic, Side::Player, Position::new(0, 3), &profile);
        let enemy = roster.spawn(UnitClass::Medic, Side::Enemy, Position::ORIGIN, &profile);
        let state = GameState::new(0, TileMap::new(MapDimensions::new(8, 8)), roster);

        let plan = GreedyAi::plan(&state, enemy).unwrap();
        assert_eq!(plan.target, UnitId(1));
        assert_eq!(plan.step, Some(CardinalDirection::South));
        assert!(!plan.in_range);
    }

    #[test]
    fn adjacent_units_hold_position() {
        let mut roster = Roster::new();
        let profile = StandardClasses.profile(UnitClass::Pyro);
        roster.spawn(UnitClass::Pyro, Side::Player, Position::new(1, 0), &profile);
        let enemy = roster.spawn(UnitClass::Pyro, Side::Enemy, Position::ORIGIN, &profile);
        let state = GameState::new(0, TileMap::new(MapDimensions::new(4, 4)), roster);

        let plan = GreedyAi::plan(&state, enemy).unwrap();
        assert!(plan.in_range);
        assert_eq!(plan.step, None);
    }

    #[test]
    fn no_living_players_means_no_target() {
        let mut roster = Roster::new();
        let profile = StandardClasses.profile(UnitClass::Pyro);
        let enemy = roster.spawn(UnitClass::Pyro, Side::Enemy, Position::ORIGIN, &profile);
        let state = GameState::new(0, TileMap::new(MapDimensions::new(4, 4)), roster);

        assert_eq!(GreedyAi::plan(&state, enemy), Err(AiError::NoValidTarget(enemy)));
    }
}
