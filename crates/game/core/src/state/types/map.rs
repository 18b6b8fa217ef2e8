use crate::config::TerrainRules;
use crate::state::{MapError, Position, UnitClass};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canonical terrain classes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    #[default]
    Grass,
    Wall,
    Water,
    Mud,
    Lava,
    Road,
    Tree,
}

impl TerrainKind {
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Concealing classes standing here are hidden.
    pub const fn conceals(self) -> bool {
        matches!(self, Self::Tree)
    }
}

/// One-shot items lying on a tile, consumed by the first unit to enter it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PickupKind {
    HealthPack,
    /// Lethal to enemy units; player units disarm it.
    Bomb,
    AttackBoost,
    DefenseBoost,
}

/// What entering a tile does to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainEffect {
    None,
    Damage { health: u32, defense: u32 },
    /// The unit cannot enter at all.
    Refused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub terrain: TerrainKind,
    pub pickup: Option<PickupKind>,
}

/// Mutable terrain grid stored column-major (`[x][y]`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// All-grass map of the given size.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self::from_fn(dimensions, |_| TerrainKind::Grass)
    }

    pub fn from_fn(dimensions: MapDimensions, mut terrain: impl FnMut(Position) -> TerrainKind) -> Self {
        let mut tiles = Vec::with_capacity(dimensions.tile_count());
        for x in 0..dimensions.width as i32 {
            for y in 0..dimensions.height as i32 {
                let position = Position::new(x, y);
                tiles.push(Tile {
                    position,
                    terrain: terrain(position),
                    pickup: None,
                });
            }
        }
        Self { dimensions, tiles }
    }

    /// Builds a map from rows of glyphs (`.` grass, `#` wall, `~` water,
    /// `,` mud, `^` lava, `=` road, `T` tree). Row index is `y`.
    pub fn parse(rows: &[&str]) -> Result<Self, MapError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count() as u32);
        let mut map = Self::new(MapDimensions::new(width, height));
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MapError::RaggedRow { row: y as u32 });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = match glyph {
                    '.' => TerrainKind::Grass,
                    '#' => TerrainKind::Wall,
                    '~' => TerrainKind::Water,
                    ',' => TerrainKind::Mud,
                    '^' => TerrainKind::Lava,
                    '=' => TerrainKind::Road,
                    'T' => TerrainKind::Tree,
                    other => return Err(MapError::UnknownGlyph { glyph: other }),
                };
                map.set_terrain(Position::new(x as i32, y as i32), terrain)?;
            }
        }
        Ok(map)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Result<usize, MapError> {
        if !self.contains(position) {
            return Err(MapError::OutOfBounds {
                position,
                width: self.dimensions.width,
                height: self.dimensions.height,
            });
        }
        Ok(position.x as usize * self.dimensions.height as usize + position.y as usize)
    }

    pub fn tile_at(&self, position: Position) -> Result<&Tile, MapError> {
        let index = self.index(position)?;
        Ok(&self.tiles[index])
    }

    pub fn terrain_at(&self, position: Position) -> Option<TerrainKind> {
        self.tile_at(position).ok().map(|tile| tile.terrain)
    }

    /// Replaces the terrain at `position`, returning what was there.
    pub fn set_terrain(
        &mut self,
        position: Position,
        terrain: TerrainKind,
    ) -> Result<TerrainKind, MapError> {
        let index = self.index(position)?;
        Ok(std::mem::replace(&mut self.tiles[index].terrain, terrain))
    }

    pub fn place_pickup(&mut self, position: Position, pickup: PickupKind) -> Result<(), MapError> {
        let index = self.index(position)?;
        self.tiles[index].pickup = Some(pickup);
        Ok(())
    }

    /// Removes and returns the pickup at `position`, if any.
    pub fn take_pickup(&mut self, position: Position) -> Option<PickupKind> {
        let index = self.index(position).ok()?;
        self.tiles[index].pickup.take()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Walls block everyone; water blocks classes that cannot cross it.
    pub fn is_passable(&self, position: Position, class: UnitClass) -> bool {
        match self.terrain_at(position) {
            None | Some(TerrainKind::Wall) => false,
            Some(TerrainKind::Water) => class.crosses_water(),
            Some(_) => true,
        }
    }

    pub fn terrain_effect_on_enter(
        &self,
        position: Position,
        class: UnitClass,
        rules: &TerrainRules,
    ) -> TerrainEffect {
        match self.terrain_at(position) {
            None | Some(TerrainKind::Wall) => TerrainEffect::Refused,
            Some(TerrainKind::Lava) => TerrainEffect::Damage {
                health: rules.lava_damage,
                defense: rules.lava_defense_loss,
            },
            Some(TerrainKind::Water) if class.crosses_water() => TerrainEffect::Damage {
                health: rules.water_damage,
                defense: 0,
            },
            Some(TerrainKind::Water) => TerrainEffect::Refused,
            Some(_) => TerrainEffect::None,
        }
    }
}
