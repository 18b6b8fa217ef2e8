//! Rule constants and match options.
//!
//! Everything numeric that the rules consume lives here so scenarios can be
//! tuned from data files without touching the resolvers. Multipliers are
//! expressed in whole percent and applied with fixed-point arithmetic.

/// How many actions a unit may take before its turn is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnPolicy {
    /// Any action, moves included, ends the unit's turn.
    #[default]
    MoveEndsTurn,
    /// One move, then one non-move action.
    MoveThenAct,
}

/// Which player units are offered turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlMode {
    /// Every living player unit acts each round.
    #[default]
    Squad,
    /// Only the first living player unit of the given class acts.
    Single(crate::state::UnitClass),
}

/// Terrain entry effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainRules {
    pub lava_damage: u32,
    pub lava_defense_loss: u32,
    /// Damage taken by water-crossing classes on entry.
    pub water_damage: u32,
}

impl TerrainRules {
    pub const DEFAULT_LAVA_DAMAGE: u32 = 2;
    pub const DEFAULT_LAVA_DEFENSE_LOSS: u32 = 1;
    pub const DEFAULT_WATER_DAMAGE: u32 = 3;
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            lava_damage: Self::DEFAULT_LAVA_DAMAGE,
            lava_defense_loss: Self::DEFAULT_LAVA_DEFENSE_LOSS,
            water_damage: Self::DEFAULT_WATER_DAMAGE,
        }
    }
}

/// Damage multipliers, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Applied to raw power when the defender has no defense left.
    pub zero_defense_pct: u32,
    pub weakness_pct: u32,
    pub resistance_pct: u32,
    pub critical_pct: u32,
}

impl CombatRules {
    pub const DEFAULT_ZERO_DEFENSE_PCT: u32 = 120;
    pub const DEFAULT_WEAKNESS_PCT: u32 = 150;
    pub const DEFAULT_RESISTANCE_PCT: u32 = 50;
    pub const DEFAULT_CRITICAL_PCT: u32 = 200;
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            zero_defense_pct: Self::DEFAULT_ZERO_DEFENSE_PCT,
            weakness_pct: Self::DEFAULT_WEAKNESS_PCT,
            resistance_pct: Self::DEFAULT_RESISTANCE_PCT,
            critical_pct: Self::DEFAULT_CRITICAL_PCT,
        }
    }
}

/// Magnitudes of map pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupRules {
    pub health_pack: u32,
    /// Health packs never raise health above this value.
    pub health_cap: u32,
    pub attack_boost: u32,
    pub defense_boost: u32,
}

impl Default for PickupRules {
    fn default() -> Self {
        Self {
            health_pack: 5,
            health_cap: 20,
            attack_boost: 2,
            defense_boost: 1,
        }
    }
}

/// Game configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub map_width: u32,
    pub map_height: u32,
    /// Side length of the square spawn zone in each corner.
    pub spawn_zone: u32,
    pub vision_radius: u32,
    pub turn_policy: TurnPolicy,
    pub control: ControlMode,
    pub terrain: TerrainRules,
    pub combat: CombatRules,
    pub pickups: PickupRules,
}

impl GameConfig {
    pub const DEFAULT_MAP_SIZE: u32 = 15;
    pub const DEFAULT_SPAWN_ZONE: u32 = 3;
    pub const DEFAULT_VISION_RADIUS: u32 = 5;

    pub fn new() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_SIZE,
            map_height: Self::DEFAULT_MAP_SIZE,
            spawn_zone: Self::DEFAULT_SPAWN_ZONE,
            vision_radius: Self::DEFAULT_VISION_RADIUS,
            turn_policy: TurnPolicy::default(),
            control: ControlMode::default(),
            terrain: TerrainRules::default(),
            combat: CombatRules::default(),
            pickups: PickupRules::default(),
        }
    }

    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn_policy = policy;
        self
    }

    pub fn with_control(mut self, control: ControlMode) -> Self {
        self.control = control;
        self
    }

    pub fn dimensions(&self) -> crate::state::MapDimensions {
        crate::state::MapDimensions::new(self.map_width, self.map_height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
