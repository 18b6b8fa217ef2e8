//! Damage arithmetic in fixed-point hundredths.
//!
//! Every multiplier is a whole percent, so `5 × 1.2` is computed as
//! `500 × 120 / 100 = 600` and floors to exactly 6.

use crate::config::CombatRules;
use crate::state::{DamageTags, DamageType};

/// Damage scaled by 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hundredths(pub u64);

impl Hundredths {
    pub const fn from_whole(value: u32) -> Self {
        Self(value as u64 * 100)
    }

    pub const fn scale(self, percent: u32) -> Self {
        Self(self.0 * percent as u64 / 100)
    }

    /// Whole damage, rounded down.
    pub fn floor(self) -> u32 {
        u32::try_from(self.0 / 100).unwrap_or(u32::MAX)
    }
}

/// `defense > 0`: `max(power - defense, 0)`; otherwise `power × zero_defense_pct`.
pub fn base_damage(power: u32, defense: u32, rules: &CombatRules) -> Hundredths {
    if defense != 0 {
        Hundredths::from_whole(power.saturating_sub(defense))
    } else {
        Hundredths::from_whole(power).scale(rules.zero_defense_pct)
    }
}

/// Weakness and resistance apply independently; both may match.
pub fn apply_affinity(
    damage: Hundredths,
    damage_type: DamageType,
    weakness: DamageTags,
    resistance: DamageTags,
    rules: &CombatRules,
) -> Hundredths {
    let mut damage = damage;
    if weakness.matches(damage_type) {
        damage = damage.scale(rules.weakness_pct);
    }
    if resistance.matches(damage_type) {
        damage = damage.scale(rules.resistance_pct);
    }
    damage
}

pub fn apply_critical(damage: Hundredths, rules: &CombatRules) -> Hundredths {
    damage.scale(rules.critical_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_is_subtracted() {
        let rules = CombatRules::default();
        assert_eq!(base_damage(5, 2, &rules).floor(), 3);
        assert_eq!(base_damage(2, 5, &rules).floor(), 0);
    }

    #[test]
    fn zero_defense_earns_a_bonus() {
        let rules = CombatRules::default();
        assert_eq!(base_damage(5, 0, &rules).floor(), 6);
        assert_eq!(base_damage(3, 0, &rules).floor(), 3);
    }

    #[test]
    fn weakness_and_resistance_scale_base_ten() {
        let rules = CombatRules::default();
        let ten = Hundredths::from_whole(10);

        let weak = apply_affinity(
            ten,
            DamageType::Fire,
            DamageTags::FIRE,
            DamageTags::MELEE,
            &rules,
        );
        assert_eq!(weak.floor(), 15);

        let resisted = apply_affinity(
            ten,
            DamageType::Fire,
            DamageTags::empty(),
            DamageTags::FIRE,
            &rules,
        );
        assert_eq!(resisted.floor(), 5);

        let both = apply_affinity(
            ten,
            DamageType::Fire,
            DamageTags::FIRE,
            DamageTags::FIRE,
            &rules,
        );
        assert_eq!(both.floor(), 7);
    }

    #[test]
    fn critical_doubles() {
        let rules = CombatRules::default();
        assert_eq!(apply_critical(Hundredths::from_whole(3), &rules).floor(), 6);
    }
}
