//! Deterministic rules for the skirmish tactical simulation.
//!
//! `skirmish-core` defines the canonical model (map, units, roster, turn
//! state) and the pure operations over it: movement, combat, abilities,
//! vision and the enemy AI. All turn-gated mutation flows through
//! [`engine::GameEngine`]; the resolvers underneath are exposed for tools
//! and tests that need them directly.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod vision;

pub use action::{
    AbilityAction, AbilityError, AbilityReport, AbilitySlot, AbilityTarget, Action, ActionKind,
    ActionResult, ActionTransition, AttackAction, AttackError, CardinalDirection, MoveAction,
    MoveError, MoveReport, PickupOutcome, attempt_move,
};
pub use ai::{AiError, AiPlan, AiReport, AiStep, AiStrike, GreedyAi};
pub use combat::{AttackOutcome, AttackResult, Strike};
pub use config::{CombatRules, ControlMode, GameConfig, PickupRules, TerrainRules, TurnPolicy};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError, TurnError,
};
pub use env::{
    AbilityKit, ClassOracle, ClassProfile, Dice, Env, FixedRng, GameEnv, GroupAbility, PcgRng,
    Reach, RngOracle, SelfBuff, SingleAbility, StandardClasses, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    DamageTags, DamageType, GameOutcome, GameState, GameStatus, InvariantViolation, MapDimensions,
    MapError, PickupKind, Position, Roster, Side, TerrainEffect, TerrainKind, Tile, TileMap,
    TurnPhase, TurnState, UnitClass, UnitId, UnitState,
};
pub use vision::visible_tiles;
