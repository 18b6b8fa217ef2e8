//! Class profiles: base stats plus the three ability slots.
//!
//! The rules never hard-code class numbers; they ask a [`ClassOracle`].
//! [`StandardClasses`] is the built-in table, and content loaders can supply
//! their own.

use crate::state::{DamageTags, DamageType, Position, TerrainKind, UnitClass};

/// Read-only source of class data.
pub trait ClassOracle: Send + Sync {
    fn profile(&self, class: UnitClass) -> ClassProfile;
}

/// Geometric footprint of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reach {
    /// `|dx| + |dy| <= radius`
    Manhattan(u32),
    /// `dx² + dy² <= radius_sq`
    Euclidean { radius_sq: u32 },
}

impl Reach {
    pub fn contains(self, origin: Position, target: Position) -> bool {
        match self {
            Self::Manhattan(radius) => origin.manhattan(target) <= radius,
            Self::Euclidean { radius_sq } => origin.distance_sq(target) <= radius_sq,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SingleAbility {
    /// Damages one enemy. Total magnitude is `damage * pellets`.
    Strike {
        reach: Reach,
        damage: u32,
        pellets: u32,
        damage_type: DamageType,
    },
    /// Rewrites the terrain of one tile.
    Ignite { reach: Reach, terrain: TerrainKind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupAbility {
    /// Damages every living unit in the area, allies and the caster included.
    Blast {
        area: Reach,
        damage: u32,
        damage_type: DamageType,
    },
    /// Heals allies in the area, the caster included.
    Heal { area: Reach, amount: u32 },
    /// Lowers enemy defense in the area.
    Sunder { area: Reach, defense: u32 },
    /// Lowers enemy attack in the area.
    Disarm { area: Reach, attack: u32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelfBuff {
    pub defense: u32,
    pub attack: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityKit {
    pub single: SingleAbility,
    pub group: GroupAbility,
    pub buff: SelfBuff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProfile {
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub movement: u32,
    #[cfg_attr(feature = "serde", serde(default = "ClassProfile::default_attack_range"))]
    pub attack_range: u32,
    pub accuracy: u8,
    pub evasion: u8,
    pub crit_chance: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weakness: DamageTags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistance: DamageTags,
    pub abilities: AbilityKit,
}

impl ClassProfile {
    pub const DEFAULT_ATTACK_RANGE: u32 = 1;

    #[cfg(feature = "serde")]
    fn default_attack_range() -> u32 {
        Self::DEFAULT_ATTACK_RANGE
    }
}

/// Built-in class table.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardClasses;

impl ClassOracle for StandardClasses {
    fn profile(&self, class: UnitClass) -> ClassProfile {
        match class {
            UnitClass::Pyro => ClassProfile {
                max_health: 20,
                attack_power: 3,
                defense: 5,
                movement: 1,
                attack_range: ClassProfile::DEFAULT_ATTACK_RANGE,
                accuracy: 85,
                evasion: 5,
                crit_chance: 5,
                weakness: DamageTags::RANGED,
                resistance: DamageTags::FIRE,
                abilities: AbilityKit {
                    single: SingleAbility::Ignite {
                        reach: Reach::Manhattan(1),
                        terrain: TerrainKind::Lava,
                    },
                    group: GroupAbility::Blast {
                        area: Reach::Manhattan(2),
                        damage: 5,
                        damage_type: DamageType::Fire,
                    },
                    buff: SelfBuff {
                        defense: 2,
                        attack: 0,
                    },
                },
            },
            UnitClass::Medic => ClassProfile {
                max_health: 15,
                attack_power: 2,
                defense: 4,
                movement: 2,
                attack_range: ClassProfile::DEFAULT_ATTACK_RANGE,
                accuracy: 90,
                evasion: 10,
                crit_chance: 5,
                weakness: DamageTags::FIRE,
                resistance: DamageTags::empty(),
                abilities: AbilityKit {
                    single: SingleAbility::Strike {
                        reach: Reach::Manhattan(3),
                        damage: 5,
                        pellets: 1,
                        damage_type: DamageType::Ranged,
                    },
                    group: GroupAbility::Heal {
                        area: Reach::Manhattan(2),
                        amount: 3,
                    },
                    buff: SelfBuff {
                        defense: 3,
                        attack: 0,
                    },
                },
            },
            UnitClass::Sniper => ClassProfile {
                max_health: 12,
                attack_power: 5,
                defense: 3,
                movement: 3,
                attack_range: ClassProfile::DEFAULT_ATTACK_RANGE,
                accuracy: 95,
                evasion: 10,
                crit_chance: 20,
                weakness: DamageTags::MELEE,
                resistance: DamageTags::empty(),
                abilities: AbilityKit {
                    single: SingleAbility::Strike {
                        reach: Reach::Euclidean { radius_sq: 36 },
                        damage: 4,
                        pellets: 1,
                        damage_type: DamageType::Ranged,
                    },
                    group: GroupAbility::Sunder {
                        area: Reach::Euclidean { radius_sq: 2 },
                        defense: 5,
                    },
                    buff: SelfBuff {
                        defense: 1,
                        attack: 0,
                    },
                },
            },
            UnitClass::Scout => ClassProfile {
                max_health: 12,
                attack_power: 5,
                defense: 2,
                movement: 4,
                attack_range: ClassProfile::DEFAULT_ATTACK_RANGE,
                accuracy: 85,
                evasion: 25,
                crit_chance: 10,
                weakness: DamageTags::FIRE,
                resistance: DamageTags::RANGED,
                abilities: AbilityKit {
                    single: SingleAbility::Strike {
                        reach: Reach::Euclidean { radius_sq: 4 },
                        damage: 1,
                        pellets: 5,
                        damage_type: DamageType::Ranged,
                    },
                    group: GroupAbility::Disarm {
                        area: Reach::Euclidean { radius_sq: 4 },
                        attack: 2,
                    },
                    buff: SelfBuff {
                        defense: 1,
                        attack: 0,
                    },
                },
            },
        }
    }
}
