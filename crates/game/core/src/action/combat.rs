//! Basic melee attack.

use crate::action::ActionTransition;
use crate::combat::{self, AttackResult, Strike};
use crate::config::CombatRules;
use crate::env::{Dice, GameEnv};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, TileMap, UnitId, UnitState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} is dead")]
    Dead { unit: UnitId },

    #[error("unit {unit} is concealed and cannot attack")]
    AbilitySuppressed { unit: UnitId },

    #[error("{attacker} cannot attack its ally {target}")]
    FriendlyTarget { attacker: UnitId, target: UnitId },

    #[error("target at distance {distance} is beyond attack range {range}")]
    OutOfRange { distance: u32, range: u32 },
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::FriendlyTarget { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "ATTACK_UNIT_NOT_FOUND",
            Self::Dead { .. } => "ATTACK_DEAD",
            Self::AbilitySuppressed { .. } => "ATTACK_SUPPRESSED",
            Self::FriendlyTarget { .. } => "ATTACK_FRIENDLY_TARGET",
            Self::OutOfRange { .. } => "ATTACK_OUT_OF_RANGE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: UnitId,
    pub target: UnitId,
}

impl AttackAction {
    pub fn new(actor: UnitId, target: UnitId) -> Self {
        Self { actor, target }
    }

    fn pair<'s>(&self, state: &'s GameState) -> Result<(&'s UnitState, &'s UnitState), AttackError> {
        let attacker = state
            .roster
            .unit(self.actor)
            .ok_or(AttackError::UnitNotFound(self.actor))?;
        let defender = state
            .roster
            .unit(self.target)
            .ok_or(AttackError::UnitNotFound(self.target))?;
        Ok((attacker, defender))
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = AttackResult;

    fn actor(&self) -> UnitId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let (attacker, defender) = self.pair(state)?;
        if !attacker.is_alive() {
            return Err(AttackError::Dead { unit: attacker.id });
        }
        if !defender.is_alive() {
            return Err(AttackError::Dead { unit: defender.id });
        }
        if attacker.side == defender.side {
            return Err(AttackError::FriendlyTarget {
                attacker: attacker.id,
                target: defender.id,
            });
        }
        let distance = attacker.position.manhattan(defender.position);
        if distance > attacker.attack_range {
            return Err(AttackError::OutOfRange {
                distance,
                range: attacker.attack_range,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<AttackResult, Self::Error> {
        let attacker = state
            .roster
            .unit(self.actor)
            .cloned()
            .ok_or(AttackError::UnitNotFound(self.actor))?;
        let mut dice = env.dice_for(state, self.actor);
        let defender = state
            .roster
            .unit_mut(self.target)
            .ok_or(AttackError::UnitNotFound(self.target))?;
        resolve_attack(
            &attacker,
            defender,
            Strike::melee(&attacker),
            &state.map,
            &mut dice,
            &env.config().combat,
        )
    }
}

/// Concealment check followed by the full combat pipeline.
pub fn resolve_attack(
    attacker: &UnitState,
    defender: &mut UnitState,
    strike: Strike,
    map: &TileMap,
    dice: &mut Dice<'_>,
    rules: &CombatRules,
) -> Result<AttackResult, AttackError> {
    if attacker.is_hidden(map) {
        return Err(AttackError::AbilitySuppressed { unit: attacker.id });
    }
    Ok(combat::resolve_strike(attacker, defender, strike, dice, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;
    use crate::config::GameConfig;
    use crate::engine::drive;
    use crate::env::{ClassOracle, FixedRng, StandardClasses};
    use crate::state::{Position, Roster, Side, TerrainKind, UnitClass};

    fn duel(attacker: UnitClass, defender: UnitClass, gap: i32) -> GameState {
        let mut roster = Roster::new();
        roster.spawn(attacker, Side::Player, Position::new(0, 0), &StandardClasses.profile(attacker));
        roster.spawn(defender, Side::Enemy, Position::new(gap, 0), &StandardClasses.profile(defender));
        GameState::new(3, TileMap::parse(&["......"]).unwrap(), roster)
    }

    fn run(state: &mut GameState, action: AttackAction, rng: FixedRng) -> Result<AttackResult, AttackError> {
        let config = GameConfig::default();
        let env = GameEnv::with_all(&config, &StandardClasses, &rng);
        drive(&action, state, &env).map_err(|err| err.error)
    }

    #[test]
    fn adjacent_melee_lands() {
        let mut state = duel(UnitClass::Sniper, UnitClass::Medic, 1);
        let result = run(&mut state, AttackAction::new(UnitId(0), UnitId(1)), FixedRng(99)).unwrap();
        // Sniper 5 attack vs Medic 4 defense, melee carries no affinity for a medic.
        assert_eq!(result.outcome, AttackOutcome::Miss);

        let mut state = duel(UnitClass::Sniper, UnitClass::Medic, 1);
        state.roster.unit_mut(UnitId(0)).unwrap().accuracy = 100;
        let result = run(&mut state, AttackAction::new(UnitId(0), UnitId(1)), FixedRng(99)).unwrap();
        assert_eq!(result.damage, 1);
        assert_eq!(state.roster.unit(UnitId(1)).unwrap().health, 14);
    }

    #[test]
    fn range_is_manhattan() {
        let mut state = duel(UnitClass::Scout, UnitClass::Pyro, 2);
        let err = run(&mut state, AttackAction::new(UnitId(0), UnitId(1)), FixedRng(0)).unwrap_err();
        assert_eq!(err, AttackError::OutOfRange { distance: 2, range: 1 });
    }

    #[test]
    fn concealed_attackers_are_suppressed() {
        let mut state = duel(UnitClass::Scout, UnitClass::Pyro, 1);
        state.map.set_terrain(Position::new(0, 0), TerrainKind::Tree).unwrap();
        let before = state.clone();
        let err = run(&mut state, AttackAction::new(UnitId(0), UnitId(1)), FixedRng(0)).unwrap_err();
        assert_eq!(err, AttackError::AbilitySuppressed { unit: UnitId(0) });
        assert_eq!(state, before);
    }

    #[test]
    fn dead_targets_and_allies_are_refused() {
        let mut state = duel(UnitClass::Scout, UnitClass::Pyro, 1);
        state.roster.unit_mut(UnitId(1)).unwrap().kill();
        let err = run(&mut state, AttackAction::new(UnitId(0), UnitId(1)), FixedRng(0)).unwrap_err();
        assert_eq!(err, AttackError::Dead { unit: UnitId(1) });

        let err = run(&mut state, AttackAction::new(UnitId(0), UnitId(0)), FixedRng(0)).unwrap_err();
        assert!(matches!(err, AttackError::FriendlyTarget { .. }));
    }
}
