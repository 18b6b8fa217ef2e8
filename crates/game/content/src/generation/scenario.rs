//! Roster placement and assembly of a starting [`GameState`].

use skirmish_core::{
    ClassOracle, Dice, GameConfig, GameState, PcgRng, Position, RngOracle, Roster, Side,
    StandardClasses, TileMap, UnitClass,
};
use tracing::{debug, info};

use super::{GenerationParams, SETUP_NONCE, SpawnZone, TerrainGenerator};

/// Which classes each side fields, in spawn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquadSpec {
    pub players: Vec<UnitClass>,
    pub enemies: Vec<UnitClass>,
}

impl SquadSpec {
    pub fn new(players: Vec<UnitClass>, enemies: Vec<UnitClass>) -> Self {
        Self { players, enemies }
    }

    /// One unit of every class per side.
    pub fn full() -> Self {
        let all = vec![
            UnitClass::Pyro,
            UnitClass::Medic,
            UnitClass::Sniper,
            UnitClass::Scout,
        ];
        Self::new(all.clone(), all)
    }

    pub fn side(&self, side: Side) -> &[UnitClass] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }
}

impl Default for SquadSpec {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("{width}x{height} map cannot hold two {zone}x{zone} spawn zones")]
    MapTooSmall { width: u32, height: u32, zone: u32 },

    #[error("{side} spawn zone has {capacity} open tiles for {requested} units")]
    ZoneFull {
        side: Side,
        capacity: usize,
        requested: usize,
    },
}

/// Assembles a starting state: terrain, then each squad in its corner.
///
/// Defaults to [`PcgRng`], [`StandardClasses`], generated terrain with
/// [`GenerationParams::default`] and a [`SquadSpec::full`] on each side.
pub struct ScenarioBuilder<'a> {
    config: GameConfig,
    seed: u64,
    classes: &'a dyn ClassOracle,
    rng: &'a dyn RngOracle,
    params: GenerationParams,
    squads: SquadSpec,
    map: Option<TileMap>,
}

impl<'a> ScenarioBuilder<'a> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            classes: &StandardClasses,
            rng: &PcgRng,
            params: GenerationParams::default(),
            squads: SquadSpec::default(),
            map: None,
        }
    }

    pub fn classes(mut self, classes: &'a dyn ClassOracle) -> Self {
        self.classes = classes;
        self
    }

    pub fn rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = rng;
        self
    }

    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn squads(mut self, squads: SquadSpec) -> Self {
        self.squads = squads;
        self
    }

    /// Uses a prepared map instead of generating one.
    pub fn map(mut self, map: TileMap) -> Self {
        self.map = Some(map);
        self
    }

    pub fn build(self) -> Result<GameState, ScenarioError> {
        let map = match self.map {
            Some(map) => map,
            None => TerrainGenerator::new(&self.config, self.rng, self.seed).generate(&self.params),
        };

        let dimensions = map.dimensions();
        let zone = self.config.spawn_zone;
        if dimensions.width < zone * 2 || dimensions.height < zone * 2 {
            return Err(ScenarioError::MapTooSmall {
                width: dimensions.width,
                height: dimensions.height,
                zone,
            });
        }

        // Terrain draws use actor 0; placement gets its own stream.
        let mut dice = Dice::new(self.rng, self.seed, SETUP_NONCE, 1);
        let mut roster = Roster::new();
        for side in [Side::Player, Side::Enemy] {
            let classes = self.squads.side(side);
            let mut open: Vec<Position> = SpawnZone::for_side(side, dimensions, zone)
                .tiles()
                .filter(|&tile| classes.iter().all(|&class| map.is_passable(tile, class)))
                .collect();
            if open.len() < classes.len() {
                return Err(ScenarioError::ZoneFull {
                    side,
                    capacity: open.len(),
                    requested: classes.len(),
                });
            }

            for &class in classes {
                let pick = dice.range(0, open.len() as u32 - 1) as usize;
                let position = open.swap_remove(pick);
                let id = roster.spawn(class, side, position, &self.classes.profile(class));
                debug!(unit = %id, %class, %side, %position, "spawned");
            }
        }

        info!(
            seed = self.seed,
            players = self.squads.players.len(),
            enemies = self.squads.enemies.len(),
            "scenario ready"
        );
        Ok(GameState::new(self.seed, map, roster))
    }
}
