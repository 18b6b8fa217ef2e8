//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use skirmish_runtime::RuntimeConfig;

/// Everything the headless client needs besides content files.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Match seed. Drawn from the clock when unset.
    pub seed: Option<u64>,
    /// `config.toml` to load instead of the bundled one.
    pub config_path: Option<PathBuf>,
    /// `classes.ron` to load instead of the bundled one.
    pub classes_path: Option<PathBuf>,
    pub max_rounds: Option<u32>,
    /// Defaults to the platform data directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_SEED` - Match seed (default: current time)
    /// - `SKIRMISH_CONFIG` - Path to a match `config.toml`
    /// - `SKIRMISH_CLASSES` - Path to a `classes.ron` class table
    /// - `SKIRMISH_MAX_ROUNDS` - Round cap, `0` for none (default: 200)
    /// - `SKIRMISH_LOG_DIR` - Directory for log files
    pub fn from_env() -> Self {
        Self {
            seed: read_env::<u64>("SKIRMISH_SEED"),
            config_path: env::var_os("SKIRMISH_CONFIG").map(PathBuf::from),
            classes_path: env::var_os("SKIRMISH_CLASSES").map(PathBuf::from),
            max_rounds: read_env::<u32>("SKIRMISH_MAX_ROUNDS"),
            log_dir: env::var_os("SKIRMISH_LOG_DIR").map(PathBuf::from),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        match self.max_rounds {
            Some(0) => config.max_rounds = None,
            Some(rounds) => config.max_rounds = Some(rounds),
            None => {}
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
