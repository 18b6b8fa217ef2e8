use std::sync::Arc;

use skirmish_content::ScenarioBuilder;
use skirmish_core::{
    Action, ClassOracle, FixedRng, GameConfig, GameOutcome, GameState, GameStatus, MapDimensions,
    Position, Roster, Side, StandardClasses, TileMap, TurnPhase, UnitClass, UnitId,
};
use skirmish_runtime::{
    AutoPlayerProvider, Event, GameStateEvent, OracleBundle, Runtime, RuntimeConfig, RuntimeError,
    ScriptedActionProvider, Topic, TurnEvent, WaitActionProvider,
};
use tokio::sync::broadcast;

fn skirmish(units: &[(UnitClass, Side, (i32, i32))], size: u32) -> GameState {
    let mut roster = Roster::new();
    for &(class, side, (x, y)) in units {
        roster.spawn(class, side, Position::new(x, y), &StandardClasses.profile(class));
    }
    GameState::new(7, TileMap::new(MapDimensions::new(size, size)), roster)
}

/// `FixedRng(99)` rolls 100 on every d100: only certain chances succeed.
fn certain_rolls() -> OracleBundle {
    OracleBundle::new(GameConfig::default(), Arc::new(StandardClasses)).with_rng(Arc::new(FixedRng(99)))
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn two_on_two_reports_victory_exactly_once() {
    let mut state = skirmish(
        &[
            (UnitClass::Sniper, Side::Player, (0, 0)),
            (UnitClass::Sniper, Side::Player, (0, 1)),
            (UnitClass::Scout, Side::Enemy, (1, 0)),
            (UnitClass::Scout, Side::Enemy, (1, 1)),
        ],
        8,
    );
    for unit in state.roster.iter_mut() {
        match unit.side {
            Side::Player => unit.accuracy = 100,
            Side::Enemy => {
                unit.evasion = 0;
                unit.health = 1;
            }
        }
    }

    let mut runtime = Runtime::builder()
        .initial_state(state)
        .oracles(certain_rolls())
        .player_provider(AutoPlayerProvider)
        .build()
        .unwrap();
    let mut turn_rx = runtime.handle().subscribe(Topic::Turn);

    assert_eq!(runtime.run().await.unwrap(), GameOutcome::Victory);
    assert_eq!(runtime.status().await.unwrap(), GameStatus::Victory);

    let game_overs: Vec<_> = drain(&mut turn_rx)
        .into_iter()
        .filter(|event| matches!(event, Event::Turn(TurnEvent::GameOver { .. })))
        .collect();
    assert_eq!(game_overs.len(), 1);
    assert!(matches!(
        game_overs[0],
        Event::Turn(TurnEvent::GameOver { outcome: GameOutcome::Victory, round: 0 })
    ));

    // Running again is a no-op on a decided match.
    assert_eq!(runtime.run().await.unwrap(), GameOutcome::Victory);
    assert!(drain(&mut turn_rx).is_empty());

    let finished = runtime.shutdown().await.unwrap();
    assert!(finished.roster.is_wiped_out(Side::Enemy));
    finished.check_invariants().unwrap();
}

#[tokio::test]
async fn rejected_actions_leave_state_untouched() {
    let state = skirmish(
        &[
            (UnitClass::Pyro, Side::Player, (0, 0)),
            (UnitClass::Pyro, Side::Enemy, (7, 7)),
        ],
        8,
    );
    let before = state.clone();
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .player_provider(ScriptedActionProvider::new([Action::move_by(UnitId(0), 3, 0)]))
        .build()
        .unwrap();
    let mut state_rx = runtime.handle().subscribe(Topic::GameState);

    let progress = runtime.step().await.unwrap();
    assert_eq!(progress.phase, TurnPhase::PlayerTurn);
    assert_eq!(runtime.handle().query_state().await.unwrap(), before);

    let events = drain(&mut state_rx);
    assert!(matches!(
        events.as_slice(),
        [Event::GameState(GameStateEvent::ActionRejected { code, .. })] if code == "MOVE_OUT_OF_RANGE"
    ));

    // The script is exhausted now.
    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ScriptExhausted { unit: UnitId(0) })
    ));
}

#[tokio::test]
async fn rejection_limit_makes_the_unit_wait() {
    let state = skirmish(
        &[
            (UnitClass::Pyro, Side::Player, (0, 0)),
            (UnitClass::Pyro, Side::Enemy, (7, 7)),
        ],
        8,
    );
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .config(RuntimeConfig {
            rejection_limit: 1,
            ..RuntimeConfig::default()
        })
        .player_provider(ScriptedActionProvider::new([Action::attack(UnitId(0), UnitId(1))]))
        .build()
        .unwrap();

    let progress = runtime.step().await.unwrap();
    assert_eq!(progress.phase, TurnPhase::EnemyTurn);
}

#[tokio::test]
async fn steps_alternate_between_sides() {
    let state = skirmish(
        &[
            (UnitClass::Medic, Side::Player, (0, 0)),
            (UnitClass::Medic, Side::Enemy, (7, 7)),
        ],
        8,
    );
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .player_provider(WaitActionProvider)
        .build()
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(handle.pending_units().await.unwrap(), vec![UnitId(0)]);
    let after_player = runtime.step().await.unwrap();
    assert_eq!(after_player.phase, TurnPhase::EnemyTurn);
    assert_eq!(handle.pending_units().await.unwrap(), vec![UnitId(1)]);

    let after_enemy = runtime.step().await.unwrap();
    assert_eq!(after_enemy.phase, TurnPhase::PlayerTurn);
    assert_eq!(after_enemy.round, 1);

    let enemy = handle.query_state().await.unwrap().unit(UnitId(1)).cloned().unwrap();
    assert_eq!(enemy.position.manhattan(Position::ORIGIN), 13);
}

#[tokio::test]
async fn round_cap_stops_a_stalled_match() {
    let state = skirmish(
        &[
            (UnitClass::Pyro, Side::Player, (0, 0)),
            (UnitClass::Pyro, Side::Enemy, (14, 14)),
        ],
        15,
    );
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .config(RuntimeConfig {
            max_rounds: Some(2),
            ..RuntimeConfig::default()
        })
        .player_provider(WaitActionProvider)
        .build()
        .unwrap();

    assert!(matches!(
        runtime.run().await,
        Err(RuntimeError::RoundLimit { rounds: 2 })
    ));
}

#[tokio::test]
async fn handle_reports_fog_limited_vision() {
    let state = skirmish(
        &[
            (UnitClass::Scout, Side::Player, (0, 0)),
            (UnitClass::Scout, Side::Enemy, (14, 14)),
        ],
        15,
    );
    let runtime = Runtime::builder().initial_state(state).build().unwrap();

    let visible = runtime.handle().visible_tiles(Side::Player).await.unwrap();
    assert!(visible.contains(&Position::new(5, 0)));
    assert!(!visible.contains(&Position::new(6, 0)));
    assert!(!visible.contains(&Position::new(14, 14)));
}

#[tokio::test]
async fn missing_provider_is_an_error() {
    let state = skirmish(
        &[
            (UnitClass::Scout, Side::Player, (0, 0)),
            (UnitClass::Scout, Side::Enemy, (5, 5)),
        ],
        8,
    );
    let mut runtime = Runtime::builder().initial_state(state).build().unwrap();
    assert!(matches!(runtime.step().await, Err(RuntimeError::ProviderNotSet)));
    assert!(matches!(
        Runtime::builder().build(),
        Err(RuntimeError::MissingState)
    ));
}

#[tokio::test]
async fn generated_match_ends_or_hits_the_cap() {
    let config = GameConfig::default();
    let state = ScenarioBuilder::new(config, 2024).build().unwrap();
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .oracles(OracleBundle::new(config, Arc::new(StandardClasses)))
        .config(RuntimeConfig {
            max_rounds: Some(60),
            ..RuntimeConfig::default()
        })
        .player_provider(AutoPlayerProvider)
        .build()
        .unwrap();

    let result = runtime.run().await;
    assert!(matches!(result, Ok(_) | Err(RuntimeError::RoundLimit { .. })));

    let state = runtime.shutdown().await.unwrap();
    state.check_invariants().unwrap();
    let summary = serde_json::to_string(&state.status()).unwrap();
    assert!(!summary.is_empty());
}
