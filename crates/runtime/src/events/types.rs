//! Event types for different topics.

use serde::{Deserialize, Serialize};
use skirmish_core::{Action, ActionResult, AiReport, GameOutcome, GameStatus, TurnPhase};

/// Events related to game state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A unit action was applied.
    ActionExecuted {
        nonce: u64,
        action: Action,
        result: ActionResult,
        status: GameStatus,
    },

    /// A unit action was refused; the state is unchanged.
    ActionRejected {
        action: Action,
        code: String,
        error: String,
    },

    /// One enemy unit finished its AI turn.
    EnemyActed { report: AiReport },
}

/// Events related to turn management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    PhaseChanged { phase: TurnPhase, round: u32 },
    /// Published exactly once per match.
    GameOver { outcome: GameOutcome, round: u32 },
}
