//! Procedural battlefield setup.
//!
//! [`TerrainGenerator`] lays random-walk terrain features and pickups over an
//! all-grass map while keeping both spawn corners clear; [`ScenarioBuilder`]
//! drops each squad into its corner and hands back a ready [`GameState`].
//!
//! [`GameState`]: skirmish_core::GameState

mod scenario;
mod terrain;

pub use scenario::{ScenarioBuilder, ScenarioError, SquadSpec};
pub use terrain::{GenerationParams, TerrainGenerator};

use skirmish_core::{MapDimensions, Position, Side};

/// Nonce reserved for setup draws so they never collide with action draws,
/// which count up from zero.
pub(crate) const SETUP_NONCE: u64 = u64::MAX;

/// Square corner zone a side spawns in: top-left for players, bottom-right
/// for enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpawnZone {
    min: Position,
    size: u32,
}

impl SpawnZone {
    pub(crate) fn for_side(side: Side, dimensions: MapDimensions, size: u32) -> Self {
        let min = match side {
            Side::Player => Position::ORIGIN,
            Side::Enemy => Position::new(
                dimensions.width.saturating_sub(size) as i32,
                dimensions.height.saturating_sub(size) as i32,
            ),
        };
        Self { min, size }
    }

    pub(crate) fn contains(&self, position: Position) -> bool {
        let size = self.size as i32;
        (self.min.x..self.min.x + size).contains(&position.x)
            && (self.min.y..self.min.y + size).contains(&position.y)
    }

    /// Tiles of the zone, column by column.
    pub(crate) fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |dx| (0..size).map(move |dy| self.min.offset(dx, dy)))
    }
}
