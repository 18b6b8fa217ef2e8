//! Skirmish client binary.
//!
//! Composition root that assembles:
//! 1. Content (configuration, class table, generated scenario)
//! 2. Runtime (simulation worker) with an automated player
//! 3. Output: fog-limited boards on stdout, a JSON summary as the last line
//!
//! ```bash
//! SKIRMISH_SEED=7 cargo run -p skirmish-client
//! ```

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use skirmish_client::{ClientConfig, MatchSummary, logging, render_board, render_roster};
use skirmish_content::{
    ClassLoader, ClassTable, ConfigLoader, ContentConfig, ContentFactory, ScenarioBuilder,
};
use skirmish_core::{GameState, Side};
use skirmish_runtime::{
    AutoPlayerProvider, Event, OracleBundle, Runtime, RuntimeError, Topic, TurnEvent,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let log_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(logging::default_log_directory);
    let _guard = logging::setup_logging(&log_dir)?;

    let seed = config.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, "Starting skirmish client");

    let (content, classes) = load_content(&config)?;
    let classes = Arc::new(classes);
    let state = ScenarioBuilder::new(content.game, seed)
        .classes(classes.as_ref())
        .params(content.generation)
        .squads(content.squads.clone())
        .build()
        .context("building scenario")?;

    println!("Seed {seed}");
    print_board(&state, content.game.vision_radius);

    let mut runtime = Runtime::builder()
        .config(config.runtime_config())
        .oracles(OracleBundle::new(content.game, classes))
        .initial_state(state)
        .player_provider(AutoPlayerProvider)
        .build()?;

    let turn_log = tokio::spawn(log_turns(runtime.handle().subscribe(Topic::Turn)));

    match runtime.run().await {
        Ok(outcome) => tracing::info!(%outcome, "Match decided"),
        Err(RuntimeError::RoundLimit { rounds }) => {
            tracing::warn!(rounds, "Match undecided at the round cap")
        }
        Err(error) => return Err(error.into()),
    }

    let state = runtime.shutdown().await?;
    turn_log.abort();

    print_board(&state, content.game.vision_radius);
    print!("{}", render_roster(&state));
    println!("{}", MatchSummary::from_state(&state).to_json()?);

    tracing::info!("Client shutdown complete");
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Bundled content, with either file overridden from the environment.
fn load_content(config: &ClientConfig) -> Result<(ContentConfig, ClassTable)> {
    let bundled = ContentFactory::bundled();
    let content = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => bundled.load_config()?,
    };
    let classes = match &config.classes_path {
        Some(path) => ClassLoader::load(path)?,
        None => bundled.load_classes()?,
    };
    tracing::debug!(
        overrides = classes.len(),
        players = content.squads.players.len(),
        enemies = content.squads.enemies.len(),
        "Content loaded"
    );
    Ok((content, classes))
}

fn print_board(state: &GameState, vision_radius: u32) {
    let visible = state.visible_tiles(Side::Player, vision_radius);
    println!("Round {} ({})", state.turn.round, state.status());
    print!("{}", render_board(state, Side::Player, &visible));
}

async fn log_turns(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Turn(TurnEvent::PhaseChanged { phase, round })) => {
                tracing::debug!(?phase, round, "Turn changed")
            }
            Ok(Event::Turn(TurnEvent::GameOver { outcome, round })) => {
                tracing::info!(%outcome, round, "Game over")
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Turn log lagged")
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
