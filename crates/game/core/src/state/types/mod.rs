pub mod common;
pub mod map;
pub mod roster;
pub mod turn;
pub mod unit;

pub use common::{Position, Side, UnitId};
pub use map::{MapDimensions, PickupKind, TerrainEffect, TerrainKind, Tile, TileMap};
pub use roster::Roster;
pub use turn::{GameOutcome, GameStatus, TurnPhase, TurnState};
pub use unit::{DamageTags, DamageType, UnitClass, UnitState};
