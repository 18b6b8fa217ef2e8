//! Match configuration loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::GameConfig;

use crate::generation::{GenerationParams, SquadSpec};
use crate::loaders::{LoadResult, read_file};

/// Everything `config.toml` can set. Omitted tables keep their defaults.
///
/// ```toml
/// [game]
/// turn_policy = "move_then_act"
///
/// [generation]
/// trees = 12
///
/// [squads]
/// players = ["Pyro", "Medic"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub game: GameConfig,
    pub generation: GenerationParams,
    pub squads: SquadSpec,
}

/// Loader for match configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ContentConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
