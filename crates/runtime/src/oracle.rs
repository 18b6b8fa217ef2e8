//! Shared, immutable collaborators for the rules.
//!
//! The worker and the orchestrator each hold a clone and build a
//! [`GameEnv`] on demand.

use std::sync::Arc;

use skirmish_core::{ClassOracle, GameConfig, GameEnv, PcgRng, RngOracle, StandardClasses};

#[derive(Clone)]
pub struct OracleBundle {
    config: GameConfig,
    classes: Arc<dyn ClassOracle>,
    rng: Arc<dyn RngOracle>,
}

impl OracleBundle {
    pub fn new(config: GameConfig, classes: Arc<dyn ClassOracle>) -> Self {
        Self {
            config,
            classes,
            rng: Arc::new(PcgRng),
        }
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(&self.config, self.classes.as_ref(), self.rng.as_ref())
    }
}

impl Default for OracleBundle {
    fn default() -> Self {
        Self::new(GameConfig::default(), Arc::new(StandardClasses))
    }
}

impl std::fmt::Debug for OracleBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleBundle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
