//! Content for the skirmish simulation: data loaders, terrain generation and
//! scenario setup.
//!
//! Generation needs nothing but `skirmish-core`. The `loaders` feature adds
//! RON and TOML readers for class tables, configuration and fixed maps.
pub mod generation;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use generation::{GenerationParams, ScenarioBuilder, ScenarioError, SquadSpec, TerrainGenerator};
pub use tables::ClassTable;

#[cfg(feature = "loaders")]
pub use loaders::{
    ClassLoader, ConfigLoader, ContentConfig, ContentFactory, LoadResult, MapLoader,
};
