//! Action domain.
//!
//! Every unit command is an [`Action`]: the acting unit plus an
//! [`ActionKind`]. Each kind has a concrete transition type implementing
//! [`ActionTransition`]; the engine routes actions to them.

pub mod ability;
pub mod combat;
pub mod movement;
mod transition;

pub use ability::{AbilityAction, AbilityError, AbilityReport, AbilitySlot, AbilityTarget};
pub use combat::{AttackAction, AttackError, resolve_attack};
pub use movement::{
    CardinalDirection, MoveAction, MoveError, MoveReport, PickupOutcome, attempt_move,
};
pub use transition::ActionTransition;

use crate::combat::AttackResult;
use crate::state::UnitId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: UnitId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: UnitId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn move_by(actor: UnitId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Move { dx, dy })
    }

    pub fn attack(actor: UnitId, target: UnitId) -> Self {
        Self::new(actor, ActionKind::Attack { target })
    }

    pub fn ability(actor: UnitId, slot: AbilitySlot, target: Option<AbilityTarget>) -> Self {
        Self::new(actor, ActionKind::Ability { slot, target })
    }

    pub fn wait(actor: UnitId) -> Self {
        Self::new(actor, ActionKind::Wait)
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, ActionKind::Move { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move { dx: i32, dy: i32 },
    Attack { target: UnitId },
    Ability {
        slot: AbilitySlot,
        target: Option<AbilityTarget>,
    },
    /// Ends the unit's turn without effect.
    Wait,
}

/// Action-specific outcome returned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Moved(MoveReport),
    Attacked { target: UnitId, result: AttackResult },
    Ability(AbilityReport),
    Waited,
}
