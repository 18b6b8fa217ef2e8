use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    GameState, PickupKind, Position, Side, TerrainEffect, TerrainKind, UnitId, UnitState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} is dead")]
    Dead { unit: UnitId },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("distance {distance} exceeds movement allowance {allowance}")]
    OutOfRange { distance: u32, allowance: u32 },

    #[error("destination {destination} is occupied by {occupant}")]
    Occupied {
        destination: Position,
        occupant: UnitId,
    },

    #[error("destination {destination} is blocked by {terrain}")]
    Blocked {
        destination: Position,
        terrain: TerrainKind,
    },

    #[error("units {unit} and {other} both occupy {position}")]
    OccupancyDesync {
        unit: UnitId,
        other: UnitId,
        position: Position,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) => ErrorSeverity::Validation,
            Self::OccupancyDesync { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "MOVE_UNIT_NOT_FOUND",
            Self::Dead { .. } => "MOVE_DEAD",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::OutOfRange { .. } => "MOVE_OUT_OF_RANGE",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::OccupancyDesync { .. } => "MOVE_OCCUPANCY_DESYNC",
        }
    }
}

/// Relative move of up to `movement` tiles (Manhattan). The unit lands on
/// the destination directly; tiles in between are not inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: UnitId,
    pub dx: i32,
    pub dy: i32,
}

impl MoveAction {
    pub fn new(actor: UnitId, dx: i32, dy: i32) -> Self {
        Self { actor, dx, dy }
    }

    pub fn step(actor: UnitId, direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(actor, dx, dy)
    }

    pub fn distance(&self) -> u32 {
        self.dx.unsigned_abs().saturating_add(self.dy.unsigned_abs())
    }

    fn unit<'s>(&self, state: &'s GameState) -> Result<&'s UnitState, MoveError> {
        state
            .roster
            .unit(self.actor)
            .ok_or(MoveError::UnitNotFound(self.actor))
    }
}

/// Grid directions with `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    North,
    South,
    West,
    East,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::West,
        CardinalDirection::East,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::East => (1, 0),
        }
    }
}

/// Effect of a pickup consumed on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupOutcome {
    Healed(u32),
    AttackRaised(u32),
    DefenseRaised(u32),
    /// A bomb killed the unit.
    Detonated,
    /// A player unit cleared a bomb.
    Disarmed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub unit: UnitId,
    pub from: Position,
    pub to: Position,
    pub terrain_damage: u32,
    pub defense_lost: u32,
    pub pickup: Option<PickupOutcome>,
    /// Terrain or a bomb killed the unit on arrival.
    pub died: bool,
    pub hidden: bool,
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveReport;

    fn actor(&self) -> UnitId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let unit = self.unit(state)?;
        if !unit.is_alive() {
            return Err(MoveError::Dead { unit: self.actor });
        }

        let destination = unit.position.offset(self.dx, self.dy);
        if !state.map.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }

        let distance = self.distance();
        if distance > unit.movement {
            return Err(MoveError::OutOfRange {
                distance,
                allowance: unit.movement,
            });
        }

        if let Some(occupant) = state.roster.occupant_at(destination) {
            return Err(MoveError::Occupied {
                destination,
                occupant: occupant.id,
            });
        }

        if !state.map.is_passable(destination, unit.class) {
            let terrain = state.map.terrain_at(destination).unwrap_or_default();
            return Err(MoveError::Blocked {
                destination,
                terrain,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<MoveReport, Self::Error> {
        let (from, class) = {
            let unit = self.unit(state)?;
            (unit.position, unit.class)
        };
        let to = from.offset(self.dx, self.dy);
        let effect = state
            .map
            .terrain_effect_on_enter(to, class, &env.config().terrain);

        let unit = state
            .roster
            .unit_mut(self.actor)
            .ok_or(MoveError::UnitNotFound(self.actor))?;
        unit.position = to;

        let (terrain_damage, defense_lost) = match effect {
            TerrainEffect::Damage { health, defense } => {
                (unit.take_damage(health), unit.lower_defense(defense))
            }
            TerrainEffect::None | TerrainEffect::Refused => (0, 0),
        };

        let mut pickup = None;
        if unit.is_alive() {
            if let Some(kind) = state.map.take_pickup(to) {
                let rules = &env.config().pickups;
                pickup = Some(match kind {
                    PickupKind::HealthPack => {
                        PickupOutcome::Healed(unit.heal(rules.health_pack, rules.health_cap))
                    }
                    PickupKind::AttackBoost => {
                        unit.attack_power += rules.attack_boost;
                        PickupOutcome::AttackRaised(rules.attack_boost)
                    }
                    PickupKind::DefenseBoost => {
                        unit.defense += rules.defense_boost;
                        PickupOutcome::DefenseRaised(rules.defense_boost)
                    }
                    PickupKind::Bomb if unit.side == Side::Enemy => {
                        unit.kill();
                        PickupOutcome::Detonated
                    }
                    PickupKind::Bomb => PickupOutcome::Disarmed,
                });
            }
        }

        let died = !unit.is_alive();
        let hidden = unit.is_hidden(&state.map);
        Ok(MoveReport {
            unit: self.actor,
            from,
            to,
            terrain_damage,
            defense_lost,
            pickup,
            died,
            hidden,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let unit = self.unit(state)?;
        if !unit.is_alive() {
            return Ok(());
        }
        let shared = state
            .roster
            .iter()
            .find(|other| other.id != unit.id && other.is_alive() && other.position == unit.position);
        match shared {
            Some(other) => Err(MoveError::OccupancyDesync {
                unit: unit.id,
                other: other.id,
                position: unit.position,
            }),
            None => Ok(()),
        }
    }
}

/// Validates and applies a move outside of turn gating.
///
/// On error nothing is mutated, so the call can be retried with a different
/// offset.
pub fn attempt_move(
    state: &mut GameState,
    env: &GameEnv<'_>,
    unit: UnitId,
    dx: i32,
    dy: i32,
) -> Result<MoveReport, MoveError> {
    crate::engine::drive(&MoveAction::new(unit, dx, dy), state, env).map_err(|err| err.error)
}
