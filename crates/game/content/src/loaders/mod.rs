//! File loaders for content data.
//!
//! TOML for configuration, RON for class tables and hand-drawn maps.

pub mod classes;
pub mod config;
pub mod factory;
pub mod map;

pub use classes::ClassLoader;
pub use config::{ConfigLoader, ContentConfig};
pub use factory::ContentFactory;
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
