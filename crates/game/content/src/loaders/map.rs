//! Hand-drawn map loader.
//!
//! Maps are rows of terrain glyphs plus an optional pickup list:
//!
//! ```ron
//! (
//!     rows: [
//!         "..~..",
//!         ".#~T.",
//!         "..=..",
//!     ],
//!     pickups: [((4, 0), HealthPack)],
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::{PickupKind, Position, TileMap};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    rows: Vec<String>,
    #[serde(default)]
    pickups: Vec<((i32, i32), PickupKind)>,
}

/// Loader for fixed maps from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<TileMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TileMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let rows: Vec<&str> = data.rows.iter().map(String::as_str).collect();
        let mut map = TileMap::parse(&rows).map_err(|e| anyhow::anyhow!("Invalid map: {}", e))?;

        for ((x, y), pickup) in data.pickups {
            map.place_pickup(Position::new(x, y), pickup)
                .map_err(|e| anyhow::anyhow!("Invalid pickup {}: {}", pickup, e))?;
        }
        Ok(map)
    }
}
