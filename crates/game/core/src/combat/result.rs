//! Attack outcomes and the resolution entry points.

use crate::config::CombatRules;
use crate::env::Dice;
use crate::state::{DamageType, UnitState};

use super::damage::{Hundredths, apply_affinity, apply_critical, base_damage};
use super::hit::{check_critical, check_evasion, check_hit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Miss,
    Evaded,
    Hit,
    Critical,
}

/// What the attacker brings: raw power and its damage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub power: u32,
    pub damage_type: DamageType,
}

impl Strike {
    pub const fn new(power: u32, damage_type: DamageType) -> Self {
        Self { power, damage_type }
    }

    /// A basic attack using the attacker's own attack power.
    pub fn melee(attacker: &UnitState) -> Self {
        Self::new(attacker.attack_power, DamageType::Melee)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// Health actually removed.
    pub damage: u32,
    pub defender_died: bool,
}

impl AttackResult {
    fn avoided(outcome: AttackOutcome) -> Self {
        Self {
            outcome,
            damage: 0,
            defender_died: false,
        }
    }

    pub fn landed(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit | AttackOutcome::Critical)
    }
}

/// Full pipeline: accuracy, evasion, then [`resolve_impact`].
///
/// Concealment is the caller's concern; by the time this runs the attack is
/// allowed.
pub fn resolve_strike(
    attacker: &UnitState,
    defender: &mut UnitState,
    strike: Strike,
    dice: &mut Dice<'_>,
    rules: &CombatRules,
) -> AttackResult {
    if !check_hit(attacker.accuracy, dice) {
        return AttackResult::avoided(AttackOutcome::Miss);
    }
    if check_evasion(defender.evasion, dice) {
        return AttackResult::avoided(AttackOutcome::Evaded);
    }
    resolve_impact(attacker.crit_chance, defender, strike, dice, rules)
}

/// Damage steps only: defense, affinity, critical, apply.
pub fn resolve_impact(
    crit_chance: u8,
    defender: &mut UnitState,
    strike: Strike,
    dice: &mut Dice<'_>,
    rules: &CombatRules,
) -> AttackResult {
    let mut damage: Hundredths = base_damage(strike.power, defender.defense, rules);
    damage = apply_affinity(
        damage,
        strike.damage_type,
        defender.weakness,
        defender.resistance,
        rules,
    );

    let critical = check_critical(crit_chance, dice);
    if critical {
        damage = apply_critical(damage, rules);
    }

    let dealt = defender.take_damage(damage.floor());
    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        damage: dealt,
        defender_died: !defender.is_alive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClassOracle, FixedRng, StandardClasses};
    use crate::state::{DamageTags, Position, Side, UnitClass, UnitId};

    fn unit(class: UnitClass, side: Side) -> UnitState {
        let profile = StandardClasses.profile(class);
        UnitState::from_profile(UnitId(0), class, side, Position::ORIGIN, &profile)
    }

    fn plain(attack: u32, defense: u32) -> (UnitState, UnitState) {
        let mut attacker = unit(UnitClass::Sniper, Side::Player);
        attacker.attack_power = attack;
        attacker.accuracy = 100;
        attacker.crit_chance = 0;
        let mut defender = unit(UnitClass::Medic, Side::Enemy);
        defender.defense = defense;
        defender.evasion = 0;
        defender.weakness = DamageTags::empty();
        defender.resistance = DamageTags::empty();
        (attacker, defender)
    }

    #[test]
    fn plain_hit_subtracts_defense() {
        // FixedRng(99) rolls 100: only 100% chances succeed.
        let rng = FixedRng(99);
        let rules = CombatRules::default();
        let (attacker, mut defender) = plain(5, 2);
        let mut dice = Dice::new(&rng, 0, 0, 0);

        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);

        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.damage, 3);
        assert_eq!(defender.health, 12);
    }

    #[test]
    fn undefended_target_takes_bonus() {
        let rng = FixedRng(99);
        let rules = CombatRules::default();
        let (attacker, mut defender) = plain(5, 0);
        let mut dice = Dice::new(&rng, 0, 0, 0);

        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);
        assert_eq!(result.damage, 6);
    }

    #[test]
    fn zero_accuracy_always_misses() {
        let rng = FixedRng(0);
        let rules = CombatRules::default();
        let (mut attacker, mut defender) = plain(5, 0);
        attacker.accuracy = 0;
        let mut dice = Dice::new(&rng, 0, 0, 0);

        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);
        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(defender.health, defender.max_health);
        assert_eq!(dice.draws(), 1);
    }

    #[test]
    fn evasion_stops_damage() {
        // FixedRng(0) rolls 1: every nonzero chance succeeds, evasion included.
        let rng = FixedRng(0);
        let rules = CombatRules::default();
        let (attacker, mut defender) = plain(5, 0);
        defender.evasion = 10;
        let mut dice = Dice::new(&rng, 0, 0, 0);

        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);
        assert_eq!(result.outcome, AttackOutcome::Evaded);
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn critical_doubles_after_affinity() {
        let rng = FixedRng(0);
        let rules = CombatRules::default();
        let (mut attacker, mut defender) = plain(12, 2);
        attacker.crit_chance = 20;
        defender.weakness = DamageTags::MELEE;

        let mut dice = Dice::new(&rng, 0, 0, 0);
        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);

        // (12 - 2) × 1.5 × 2
        assert_eq!(result.outcome, AttackOutcome::Critical);
        assert_eq!(result.damage, 15);
        assert!(result.defender_died);
        assert_eq!(defender.health, 0);
    }

    #[test]
    fn lethal_damage_clamps_health() {
        let rng = FixedRng(99);
        let rules = CombatRules::default();
        let (attacker, mut defender) = plain(40, 1);
        let mut dice = Dice::new(&rng, 0, 0, 0);

        let result = resolve_strike(&attacker, &mut defender, Strike::melee(&attacker), &mut dice, &rules);
        assert_eq!(result.damage, 15);
        assert!(result.defender_died);
    }
}
