//! Random-walk terrain and pickup placement.

use skirmish_core::{
    CardinalDirection, Dice, GameConfig, MapDimensions, PickupKind, Position, RngOracle, Side,
    TerrainKind, TileMap,
};
use tracing::{debug, warn};

use super::{SETUP_NONCE, SpawnZone};

/// How much of each feature to scatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationParams {
    pub roads: u32,
    pub road_length: u32,
    pub rivers: u32,
    pub river_length: u32,
    pub lava_pools: u32,
    /// Inclusive `(min, max)` tiles per lava pool.
    pub lava_size: (u32, u32),
    pub wall_clusters: u32,
    pub wall_size: (u32, u32),
    pub mud_patches: u32,
    pub trees: u32,
    pub health_packs: u32,
    pub bombs: u32,
    pub attack_boosts: u32,
    pub defense_boosts: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            roads: 2,
            road_length: 12,
            rivers: 3,
            river_length: 12,
            lava_pools: 4,
            lava_size: (2, 3),
            wall_clusters: 5,
            wall_size: (3, 6),
            mud_patches: 5,
            trees: 8,
            health_packs: 3,
            bombs: 3,
            attack_boosts: 2,
            defense_boosts: 2,
        }
    }
}

impl GenerationParams {
    /// Nothing but grass.
    pub fn empty() -> Self {
        Self {
            roads: 0,
            road_length: 0,
            rivers: 0,
            river_length: 0,
            lava_pools: 0,
            lava_size: (0, 0),
            wall_clusters: 0,
            wall_size: (0, 0),
            mud_patches: 0,
            trees: 0,
            health_packs: 0,
            bombs: 0,
            attack_boosts: 0,
            defense_boosts: 0,
        }
    }
}

/// Fills a map from a seed. The same seed, oracle and parameters always yield
/// the same map.
pub struct TerrainGenerator<'a> {
    dice: Dice<'a>,
    map: TileMap,
    zones: [SpawnZone; 2],
}

impl<'a> TerrainGenerator<'a> {
    /// Tries per spot before a spot placement gives up.
    const SPOT_ATTEMPTS: u32 = 64;

    pub fn new(config: &GameConfig, rng: &'a dyn RngOracle, seed: u64) -> Self {
        let dimensions = config.dimensions();
        Self {
            dice: Dice::new(rng, seed, SETUP_NONCE, 0),
            map: TileMap::new(dimensions),
            zones: [
                SpawnZone::for_side(Side::Player, dimensions, config.spawn_zone),
                SpawnZone::for_side(Side::Enemy, dimensions, config.spawn_zone),
            ],
        }
    }

    pub fn generate(mut self, params: &GenerationParams) -> TileMap {
        if self.map.dimensions().tile_count() == 0 {
            return self.map;
        }

        for _ in 0..params.roads {
            self.walk(TerrainKind::Road, params.road_length);
        }
        for _ in 0..params.rivers {
            self.walk(TerrainKind::Water, params.river_length);
        }
        for _ in 0..params.lava_pools {
            let size = self.dice.range(params.lava_size.0, params.lava_size.1);
            self.walk(TerrainKind::Lava, size);
        }
        for _ in 0..params.wall_clusters {
            let size = self.dice.range(params.wall_size.0, params.wall_size.1);
            self.walk(TerrainKind::Wall, size);
        }
        self.scatter_terrain(TerrainKind::Mud, params.mud_patches);
        self.scatter_terrain(TerrainKind::Tree, params.trees);

        for (pickup, count) in [
            (PickupKind::HealthPack, params.health_packs),
            (PickupKind::Bomb, params.bombs),
            (PickupKind::AttackBoost, params.attack_boosts),
            (PickupKind::DefenseBoost, params.defense_boosts),
        ] {
            self.scatter_pickup(pickup, count);
        }

        debug!(draws = self.dice.draws(), "terrain generated");
        self.map
    }

    fn in_spawn_zone(&self, position: Position) -> bool {
        self.zones.iter().any(|zone| zone.contains(position))
    }

    fn random_position(&mut self) -> Position {
        let MapDimensions { width, height } = self.map.dimensions();
        let x = self.dice.range(0, width - 1);
        let y = self.dice.range(0, height - 1);
        Position::new(x as i32, y as i32)
    }

    /// Paints `length` steps of a clamped random walk. Steps that land in a
    /// spawn zone move the walker but leave the tile untouched.
    fn walk(&mut self, terrain: TerrainKind, length: u32) {
        let MapDimensions { width, height } = self.map.dimensions();
        let mut cursor = self.random_position();
        for _ in 0..length {
            if !self.in_spawn_zone(cursor) {
                // The cursor is clamped to the map, so this cannot fail.
                let _ = self.map.set_terrain(cursor, terrain);
            }
            let (dx, dy) = CardinalDirection::ALL[self.dice.range(0, 3) as usize].delta();
            cursor = Position::new(
                (cursor.x + dx).clamp(0, width as i32 - 1),
                (cursor.y + dy).clamp(0, height as i32 - 1),
            );
        }
    }

    /// Draws positions until one satisfies `accept`, or gives up.
    fn find_spot(&mut self, accept: impl Fn(&TileMap, Position) -> bool) -> Option<Position> {
        (0..Self::SPOT_ATTEMPTS).find_map(|_| {
            let position = self.random_position();
            (!self.in_spawn_zone(position) && accept(&self.map, position)).then_some(position)
        })
    }

    fn scatter_terrain(&mut self, terrain: TerrainKind, count: u32) {
        for placed in 0..count {
            let spot = self.find_spot(|map, position| {
                map.terrain_at(position) == Some(TerrainKind::Grass)
            });
            let Some(position) = spot else {
                warn!(%terrain, placed, wanted = count, "ran out of grass");
                return;
            };
            let _ = self.map.set_terrain(position, terrain);
        }
    }

    fn scatter_pickup(&mut self, pickup: PickupKind, count: u32) {
        for placed in 0..count {
            let spot = self.find_spot(|map, position| {
                map.tile_at(position).is_ok_and(|tile| {
                    tile.pickup.is_none()
                        && matches!(
                            tile.terrain,
                            TerrainKind::Grass | TerrainKind::Road | TerrainKind::Mud
                        )
                })
            });
            let Some(position) = spot else {
                warn!(%pickup, placed, wanted = count, "no free tile for pickup");
                return;
            };
            let _ = self.map.place_pickup(position, pickup);
        }
    }
}
