//! Class abilities: one single-target slot, one area slot, one self-buff.
//!
//! Single-target strikes run the full combat pipeline with the ability's
//! magnitude in place of attack power. Area damage skips the avoidance draws.

use crate::action::ActionTransition;
use crate::action::combat::resolve_attack;
use crate::combat::{self, AttackResult, Strike};
use crate::env::{GameEnv, GroupAbility, Reach, SingleAbility};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Position, TerrainKind, UnitId, UnitState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AbilitySlot {
    Single,
    Group,
    Buff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTarget {
    Unit(UnitId),
    Tile(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} is dead")]
    Dead { unit: UnitId },

    #[error("unit {unit} is concealed and cannot attack")]
    AbilitySuppressed { unit: UnitId },

    #[error("no valid target for {unit}")]
    NoValidTarget { unit: UnitId },

    #[error("{slot} ability does not accept target {target:?}")]
    InvalidTarget {
        slot: AbilitySlot,
        target: Option<AbilityTarget>,
    },

    #[error("target at {position} is out of reach")]
    OutOfRange { position: Position },

    #[error("target tile {position} is out of bounds")]
    OutOfBounds { position: Position },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::InvalidTarget { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "ABILITY_UNIT_NOT_FOUND",
            Self::Dead { .. } => "ABILITY_DEAD",
            Self::AbilitySuppressed { .. } => "ABILITY_SUPPRESSED",
            Self::NoValidTarget { .. } => "ABILITY_NO_VALID_TARGET",
            Self::InvalidTarget { .. } => "ABILITY_INVALID_TARGET",
            Self::OutOfRange { .. } => "ABILITY_OUT_OF_RANGE",
            Self::OutOfBounds { .. } => "ABILITY_OUT_OF_BOUNDS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityReport {
    Struck {
        target: UnitId,
        pellets: u32,
        result: AttackResult,
    },
    Ignited {
        position: Position,
        previous: TerrainKind,
    },
    Blasted {
        hits: Vec<(UnitId, AttackResult)>,
    },
    Healed {
        amounts: Vec<(UnitId, u32)>,
    },
    Sundered {
        amounts: Vec<(UnitId, u32)>,
    },
    Disarmed {
        amounts: Vec<(UnitId, u32)>,
    },
    Buffed {
        defense: u32,
        attack: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityAction {
    pub actor: UnitId,
    pub slot: AbilitySlot,
    pub target: Option<AbilityTarget>,
}

impl AbilityAction {
    pub fn new(actor: UnitId, slot: AbilitySlot, target: Option<AbilityTarget>) -> Self {
        Self {
            actor,
            slot,
            target,
        }
    }

    fn caster<'s>(&self, state: &'s GameState) -> Result<&'s UnitState, AbilityError> {
        state
            .roster
            .unit(self.actor)
            .ok_or(AbilityError::UnitNotFound(self.actor))
    }

    fn invalid_target(&self) -> AbilityError {
        AbilityError::InvalidTarget {
            slot: self.slot,
            target: self.target,
        }
    }

    /// Resolves the strike victim: the named unit, or the nearest enemy in reach.
    fn strike_target(
        &self,
        state: &GameState,
        caster: &UnitState,
        reach: Reach,
    ) -> Result<UnitId, AbilityError> {
        match self.target {
            Some(AbilityTarget::Unit(id)) => {
                let target = state
                    .roster
                    .unit(id)
                    .ok_or(AbilityError::UnitNotFound(id))?;
                if !target.is_alive() {
                    return Err(AbilityError::Dead { unit: id });
                }
                if target.side == caster.side {
                    return Err(self.invalid_target());
                }
                if !reach.contains(caster.position, target.position) {
                    return Err(AbilityError::OutOfRange {
                        position: target.position,
                    });
                }
                Ok(id)
            }
            Some(AbilityTarget::Tile(_)) => Err(self.invalid_target()),
            None => state
                .roster
                .living(caster.side.opponent())
                .filter(|enemy| reach.contains(caster.position, enemy.position))
                .enumerate()
                .min_by_key(|(index, enemy)| (caster.position.distance_sq(enemy.position), *index))
                .map(|(_, enemy)| enemy.id)
                .ok_or(AbilityError::NoValidTarget { unit: caster.id }),
        }
    }

    fn ignite_tile(
        &self,
        state: &GameState,
        caster: &UnitState,
        reach: Reach,
    ) -> Result<Position, AbilityError> {
        let Some(AbilityTarget::Tile(position)) = self.target else {
            return Err(self.invalid_target());
        };
        if !state.map.contains(position) {
            return Err(AbilityError::OutOfBounds { position });
        }
        if position == caster.position || !reach.contains(caster.position, position) {
            return Err(AbilityError::OutOfRange { position });
        }
        Ok(position)
    }
}

impl ActionTransition for AbilityAction {
    type Error = AbilityError;
    type Result = AbilityReport;

    fn actor(&self) -> UnitId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let caster = self.caster(state)?;
        if !caster.is_alive() {
            return Err(AbilityError::Dead { unit: caster.id });
        }
        let kit = env.classes().profile(caster.class).abilities;
        let hidden = caster.is_hidden(&state.map);

        match self.slot {
            AbilitySlot::Single => match kit.single {
                SingleAbility::Strike { reach, .. } => {
                    if hidden {
                        return Err(AbilityError::AbilitySuppressed { unit: caster.id });
                    }
                    self.strike_target(state, caster, reach).map(|_| ())
                }
                SingleAbility::Ignite { reach, .. } => {
                    self.ignite_tile(state, caster, reach).map(|_| ())
                }
            },
            AbilitySlot::Group => {
                if self.target.is_some() {
                    return Err(self.invalid_target());
                }
                if hidden && matches!(kit.group, GroupAbility::Blast { .. }) {
                    return Err(AbilityError::AbilitySuppressed { unit: caster.id });
                }
                Ok(())
            }
            AbilitySlot::Buff => {
                if self.target.is_some() {
                    return Err(self.invalid_target());
                }
                Ok(())
            }
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<AbilityReport, Self::Error> {
        let caster = self.caster(state)?.clone();
        let kit = env.classes().profile(caster.class).abilities;
        let rules = env.config().combat;

        match self.slot {
            AbilitySlot::Single => match kit.single {
                SingleAbility::Strike {
                    reach,
                    damage,
                    pellets,
                    damage_type,
                } => {
                    let target = self.strike_target(state, &caster, reach)?;
                    let mut dice = env.dice_for(state, caster.id);
                    let defender = state
                        .roster
                        .unit_mut(target)
                        .ok_or(AbilityError::UnitNotFound(target))?;
                    let strike = Strike::new(damage * pellets, damage_type);
                    let result = resolve_attack(&caster, defender, strike, &state.map, &mut dice, &rules)
                        .map_err(|_| AbilityError::AbilitySuppressed { unit: caster.id })?;
                    Ok(AbilityReport::Struck {
                        target,
                        pellets,
                        result,
                    })
                }
                SingleAbility::Ignite { reach, terrain } => {
                    let position = self.ignite_tile(state, &caster, reach)?;
                    let previous = state
                        .map
                        .set_terrain(position, terrain)
                        .map_err(|_| AbilityError::OutOfBounds { position })?;
                    Ok(AbilityReport::Ignited { position, previous })
                }
            },
            AbilitySlot::Group => {
                let origin = caster.position;
                let in_area = |area: Reach, unit: &UnitState| {
                    unit.is_alive() && area.contains(origin, unit.position)
                };
                match kit.group {
                    GroupAbility::Blast {
                        area,
                        damage,
                        damage_type,
                    } => {
                        let victims: Vec<UnitId> = state
                            .roster
                            .iter()
                            .filter(|unit| in_area(area, unit))
                            .map(|unit| unit.id)
                            .collect();
                        let mut dice = env.dice_for(state, caster.id);
                        let mut hits = Vec::with_capacity(victims.len());
                        for id in victims {
                            if let Some(unit) = state.roster.unit_mut(id) {
                                let strike = Strike::new(damage, damage_type);
                                let result =
                                    combat::resolve_impact(caster.crit_chance, unit, strike, &mut dice, &rules);
                                hits.push((id, result));
                            }
                        }
                        Ok(AbilityReport::Blasted { hits })
                    }
                    GroupAbility::Heal { area, amount } => {
                        let amounts = state
                            .roster
                            .iter_mut()
                            .filter(|unit| unit.side == caster.side && in_area(area, unit))
                            .map(|unit| {
                                let cap = unit.max_health;
                                (unit.id, unit.heal(amount, cap))
                            })
                            .collect();
                        Ok(AbilityReport::Healed { amounts })
                    }
                    GroupAbility::Sunder { area, defense } => {
                        let amounts = state
                            .roster
                            .iter_mut()
                            .filter(|unit| unit.side != caster.side && in_area(area, unit))
                            .map(|unit| (unit.id, unit.lower_defense(defense)))
                            .collect();
                        Ok(AbilityReport::Sundered { amounts })
                    }
                    GroupAbility::Disarm { area, attack } => {
                        let amounts = state
                            .roster
                            .iter_mut()
                            .filter(|unit| unit.side != caster.side && in_area(area, unit))
                            .map(|unit| (unit.id, unit.lower_attack(attack)))
                            .collect();
                        Ok(AbilityReport::Disarmed { amounts })
                    }
                }
            }
            AbilitySlot::Buff => {
                let unit = state
                    .roster
                    .unit_mut(caster.id)
                    .ok_or(AbilityError::UnitNotFound(caster.id))?;
                unit.defense += kit.buff.defense;
                unit.attack_power += kit.buff.attack;
                Ok(AbilityReport::Buffed {
                    defense: kit.buff.defense,
                    attack: kit.buff.attack,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;
    use crate::config::GameConfig;
    use crate::engine::drive;
    use crate::env::{ClassOracle, FixedRng, StandardClasses};
    use crate::state::{MapDimensions, Roster, Side, TileMap, UnitClass};

    fn board(units: &[(UnitClass, Side, (i32, i32))]) -> GameState {
        let mut roster = Roster::new();
        for &(class, side, (x, y)) in units {
            roster.spawn(class, side, Position::new(x, y), &StandardClasses.profile(class));
        }
        GameState::new(11, TileMap::new(MapDimensions::new(10, 10)), roster)
    }

    fn cast(
        state: &mut GameState,
        action: AbilityAction,
        rng: FixedRng,
    ) -> Result<AbilityReport, AbilityError> {
        let config = GameConfig::default();
        let env = GameEnv::with_all(&config, &StandardClasses, &rng);
        drive(&action, state, &env).map_err(|err| err.error)
    }

    #[test]
    fn sniper_picks_the_nearest_enemy_in_reach() {
        let mut state = board(&[
            (UnitClass::Sniper, Side::Player, (0, 0)),
            (UnitClass::Pyro, Side::Enemy, (5, 0)),
            (UnitClass::Scout, Side::Enemy, (3, 3)),
        ]);
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, None),
            FixedRng(99),
        )
        .unwrap();
        let AbilityReport::Struck { target, result, .. } = report else {
            panic!("expected a strike, got {report:?}");
        };
        // (3,3) is 18 away squared, (5,0) is 25.
        assert_eq!(target, UnitId(2));
        // FixedRng(99) only passes certain chances; sniper accuracy is 95.
        assert_eq!(result.outcome, AttackOutcome::Miss);
    }

    #[test]
    fn strike_without_targets_in_reach_fails() {
        let mut state = board(&[
            (UnitClass::Medic, Side::Player, (0, 0)),
            (UnitClass::Pyro, Side::Enemy, (4, 0)),
        ]);
        let err = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, None),
            FixedRng(0),
        )
        .unwrap_err();
        assert_eq!(err, AbilityError::NoValidTarget { unit: UnitId(0) });
    }

    #[test]
    fn scout_burst_combines_pellets() {
        let mut state = board(&[
            (UnitClass::Scout, Side::Player, (0, 0)),
            (UnitClass::Medic, Side::Enemy, (1, 1)),
        ]);
        {
            let scout = state.roster.unit_mut(UnitId(0)).unwrap();
            scout.accuracy = 100;
            scout.crit_chance = 0;
        }
        state.roster.unit_mut(UnitId(1)).unwrap().evasion = 0;
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, Some(AbilityTarget::Unit(UnitId(1)))),
            FixedRng(99),
        )
        .unwrap();
        // 5 pellets of 1 against defense 4.
        assert!(matches!(
            report,
            AbilityReport::Struck { pellets: 5, result: AttackResult { damage: 1, .. }, .. }
        ));
    }

    #[test]
    fn pyro_ignites_an_adjacent_tile() {
        let mut state = board(&[(UnitClass::Pyro, Side::Player, (4, 4))]);
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, Some(AbilityTarget::Tile(Position::new(4, 5)))),
            FixedRng(0),
        )
        .unwrap();
        assert_eq!(
            report,
            AbilityReport::Ignited { position: Position::new(4, 5), previous: TerrainKind::Grass }
        );
        assert_eq!(state.map.terrain_at(Position::new(4, 5)), Some(TerrainKind::Lava));

        let err = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, Some(AbilityTarget::Tile(Position::new(6, 4)))),
            FixedRng(0),
        )
        .unwrap_err();
        assert_eq!(err, AbilityError::OutOfRange { position: Position::new(6, 4) });
    }

    #[test]
    fn pyro_blast_hits_everyone_nearby_including_itself() {
        let mut state = board(&[
            (UnitClass::Pyro, Side::Player, (4, 4)),
            (UnitClass::Medic, Side::Player, (4, 5)),
            (UnitClass::Scout, Side::Enemy, (5, 5)),
            (UnitClass::Sniper, Side::Enemy, (7, 4)),
        ]);
        state.roster.unit_mut(UnitId(0)).unwrap().defense = 0;
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Group, None),
            FixedRng(99),
        )
        .unwrap();
        let AbilityReport::Blasted { hits } = report else {
            panic!("expected a blast, got {report:?}");
        };
        let hit_ids: Vec<UnitId> = hits.iter().map(|(id, _)| *id).collect();
        assert_eq!(hit_ids, vec![UnitId(0), UnitId(1), UnitId(2)]);
        // Pyro, defense 0: 5 × 1.2 = 6, resists fire ×0.5 = 3.
        assert_eq!(hits[0].1.damage, 3);
        // Medic: 5 - 4 = 1, weak to fire ×1.5 = 1.5 → 1.
        assert_eq!(hits[1].1.damage, 1);
        // Scout: 5 - 2 = 3, weak to fire ×1.5 = 4.5 → 4.
        assert_eq!(hits[2].1.damage, 4);
        assert_eq!(state.roster.unit(UnitId(0)).unwrap().health, 17);
    }

    #[test]
    fn medic_heal_is_capped() {
        let mut state = board(&[
            (UnitClass::Medic, Side::Player, (2, 2)),
            (UnitClass::Pyro, Side::Player, (2, 3)),
            (UnitClass::Scout, Side::Enemy, (3, 2)),
        ]);
        state.roster.unit_mut(UnitId(1)).unwrap().health = 19;
        state.roster.unit_mut(UnitId(2)).unwrap().health = 1;
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Group, None),
            FixedRng(0),
        )
        .unwrap();
        assert_eq!(
            report,
            AbilityReport::Healed { amounts: vec![(UnitId(0), 0), (UnitId(1), 1)] }
        );
        assert_eq!(state.roster.unit(UnitId(2)).unwrap().health, 1);
    }

    #[test]
    fn debuffs_floor_at_zero() {
        let mut state = board(&[
            (UnitClass::Sniper, Side::Player, (2, 2)),
            (UnitClass::Scout, Side::Enemy, (3, 3)),
        ]);
        let report = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Group, None),
            FixedRng(0),
        )
        .unwrap();
        assert_eq!(report, AbilityReport::Sundered { amounts: vec![(UnitId(1), 2)] });
        assert_eq!(state.roster.unit(UnitId(1)).unwrap().defense, 0);
    }

    #[test]
    fn buff_raises_caster_defense() {
        let mut state = board(&[(UnitClass::Medic, Side::Player, (2, 2))]);
        cast(&mut state, AbilityAction::new(UnitId(0), AbilitySlot::Buff, None), FixedRng(0)).unwrap();
        assert_eq!(state.roster.unit(UnitId(0)).unwrap().defense, 7);
    }

    #[test]
    fn concealed_casters_cannot_strike() {
        let mut state = board(&[
            (UnitClass::Scout, Side::Player, (2, 2)),
            (UnitClass::Pyro, Side::Enemy, (3, 2)),
        ]);
        state.map.set_terrain(Position::new(2, 2), TerrainKind::Tree).unwrap();
        let err = cast(
            &mut state,
            AbilityAction::new(UnitId(0), AbilitySlot::Single, None),
            FixedRng(0),
        )
        .unwrap_err();
        assert_eq!(err, AbilityError::AbilitySuppressed { unit: UnitId(0) });

        // Debuffs are not attacks.
        assert!(cast(&mut state, AbilityAction::new(UnitId(0), AbilitySlot::Group, None), FixedRng(0)).is_ok());
    }
}
