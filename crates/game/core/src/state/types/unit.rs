use crate::env::ClassProfile;
use crate::state::{Position, Side, TileMap, UnitId};

/// Unit archetypes. Classes differ only in data and ability behavior.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum UnitClass {
    /// Heavy.
    Pyro,
    /// Support.
    Medic,
    /// Marksman.
    Sniper,
    /// Skirmisher.
    Scout,
}

impl UnitClass {
    pub const fn archetype(self) -> &'static str {
        match self {
            Self::Pyro => "heavy",
            Self::Medic => "support",
            Self::Sniper => "marksman",
            Self::Scout => "skirmisher",
        }
    }

    pub const fn crosses_water(self) -> bool {
        matches!(self, Self::Pyro | Self::Medic)
    }

    /// Whether concealing terrain hides this class.
    pub const fn conceals(self) -> bool {
        matches!(self, Self::Sniper | Self::Scout)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    Melee,
    Ranged,
    Fire,
}

impl DamageType {
    pub const fn tag(self) -> DamageTags {
        match self {
            Self::Melee => DamageTags::MELEE,
            Self::Ranged => DamageTags::RANGED,
            Self::Fire => DamageTags::FIRE,
        }
    }
}

bitflags::bitflags! {
    /// Set of damage types, used for weaknesses and resistances.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageTags: u8 {
        const MELEE = 1 << 0;
        const RANGED = 1 << 1;
        const FIRE = 1 << 2;
    }
}

impl DamageTags {
    pub fn matches(self, damage_type: DamageType) -> bool {
        self.contains(damage_type.tag())
    }
}

/// Live state of one unit. Dead units keep their record with zero health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub class: UnitClass,
    pub side: Side,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    /// Manhattan distance budget per move.
    pub movement: u32,
    pub attack_range: u32,
    /// Percent chance, 0..=100.
    pub accuracy: u8,
    /// Percent chance, 0..=100.
    pub evasion: u8,
    /// Percent chance, 0..=100.
    pub crit_chance: u8,
    pub weakness: DamageTags,
    pub resistance: DamageTags,
}

impl UnitState {
    pub fn from_profile(
        id: UnitId,
        class: UnitClass,
        side: Side,
        position: Position,
        profile: &ClassProfile,
    ) -> Self {
        Self {
            id,
            class,
            side,
            position,
            health: profile.max_health,
            max_health: profile.max_health,
            attack_power: profile.attack_power,
            defense: profile.defense,
            movement: profile.movement,
            attack_range: profile.attack_range,
            accuracy: profile.accuracy.min(100),
            evasion: profile.evasion.min(100),
            crit_chance: profile.crit_chance.min(100),
            weakness: profile.weakness,
            resistance: profile.resistance,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Derived from the current tile; never cached.
    pub fn is_hidden(&self, map: &TileMap) -> bool {
        self.class.conceals()
            && map
                .terrain_at(self.position)
                .is_some_and(|terrain| terrain.conceals())
    }

    /// Returns the health actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Heals up to `cap`, returning the amount restored. Dead units stay dead.
    pub fn heal(&mut self, amount: u32, cap: u32) -> u32 {
        if !self.is_alive() || self.health >= cap {
            return 0;
        }
        let restored = amount.min(cap - self.health);
        self.health += restored;
        restored
    }

    pub fn lower_defense(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.defense);
        self.defense -= lost;
        lost
    }

    pub fn lower_attack(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.attack_power);
        self.attack_power -= lost;
        lost
    }

    pub fn kill(&mut self) {
        self.health = 0;
    }
}
