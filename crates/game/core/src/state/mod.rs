//! Authoritative game state representation.
//!
//! [`GameState`] owns the terrain grid, both squads and the turn bookkeeping.
//! Runtime layers clone or query it, but turn-gated mutation goes through the
//! engine.
mod error;
pub mod types;

use std::collections::BTreeSet;

pub use error::{InvariantViolation, MapError};
pub use types::{
    DamageTags, DamageType, GameOutcome, GameStatus, MapDimensions, PickupKind, Position, Roster,
    Side, TerrainEffect, TerrainKind, Tile, TileMap, TurnPhase, TurnState, UnitClass, UnitId,
    UnitState,
};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once at setup; combined with `turn.nonce` for every random draw.
    pub game_seed: u64,
    pub map: TileMap,
    pub roster: Roster,
    pub turn: TurnState,
}

impl GameState {
    pub fn new(game_seed: u64, map: TileMap, roster: Roster) -> Self {
        Self {
            game_seed,
            map,
            roster,
            turn: TurnState::new(),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.roster.unit(id)
    }

    /// Victory is checked before defeat, so a mutual wipe counts as a win.
    pub fn status(&self) -> GameStatus {
        if let TurnPhase::GameOver(outcome) = self.turn.phase {
            return outcome.into();
        }
        if self.roster.is_wiped_out(Side::Enemy) {
            GameStatus::Victory
        } else if self.roster.is_wiped_out(Side::Player) {
            GameStatus::Defeat
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn visible_tiles(&self, side: Side, radius: u32) -> BTreeSet<Position> {
        crate::vision::visible_tiles(&self.map, self.roster.living(side), radius)
    }

    /// Verifies that every unit is on the map and no two living units share a tile.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut occupied: Vec<(Position, UnitId)> = Vec::new();
        for unit in self.roster.iter() {
            if !self.map.contains(unit.position) {
                return Err(InvariantViolation::UnitOutOfBounds {
                    unit: unit.id,
                    position: unit.position,
                });
            }
            if !unit.is_alive() {
                continue;
            }
            if let Some(&(position, first)) =
                occupied.iter().find(|(position, _)| *position == unit.position)
            {
                return Err(InvariantViolation::SharedTile {
                    first,
                    second: unit.id,
                    position,
                });
            }
            occupied.push((unit.position, unit.id));
        }
        Ok(())
    }
}
