//! Content factory for building a match setup from a data directory.

use std::path::{Path, PathBuf};

use skirmish_core::TileMap;

use crate::loaders::{ClassLoader, ConfigLoader, ContentConfig, LoadResult, MapLoader};
use crate::tables::ClassTable;

/// Loads content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── classes.ron
/// └── maps/
///     └── crossing.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<ContentConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ContentConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Loads `classes.ron`, or an empty table when the file is absent.
    pub fn load_classes(&self) -> LoadResult<ClassTable> {
        let path = self.data_dir.join("classes.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no class table, using built-in profiles");
            return Ok(ClassTable::new());
        }
        ClassLoader::load(&path)
    }

    /// Loads `maps/<name>.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<TileMap> {
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path)
    }
}
