use std::collections::BTreeSet;

use crate::state::{Side, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Answer to "is the game over?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Victory,
    Defeat,
}

impl GameStatus {
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            Self::Ongoing => None,
            Self::Victory => Some(GameOutcome::Victory),
            Self::Defeat => Some(GameOutcome::Defeat),
        }
    }
}

impl From<GameOutcome> for GameStatus {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Victory => Self::Victory,
            GameOutcome::Defeat => Self::Defeat,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    PlayerTurn,
    EnemyTurn,
    GameOver(GameOutcome),
}

impl TurnPhase {
    /// The side allowed to act, or `None` once the game is decided.
    pub const fn active_side(self) -> Option<Side> {
        match self {
            Self::PlayerTurn => Some(Side::Player),
            Self::EnemyTurn => Some(Side::Enemy),
            Self::GameOver(_) => None,
        }
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}

/// Turn-scoped bookkeeping: who has moved, who has acted, who is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Completed player+enemy cycles.
    pub round: u32,
    /// Successful actions so far; feeds the dice seeds.
    pub nonce: u64,
    pub selected: Option<UnitId>,
    acted: BTreeSet<UnitId>,
    moved: BTreeSet<UnitId>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::PlayerTurn,
            round: 0,
            nonce: 0,
            selected: None,
            acted: BTreeSet::new(),
            moved: BTreeSet::new(),
        }
    }

    pub fn has_acted(&self, unit: UnitId) -> bool {
        self.acted.contains(&unit)
    }

    pub fn has_moved(&self, unit: UnitId) -> bool {
        self.moved.contains(&unit)
    }

    pub fn mark_acted(&mut self, unit: UnitId) {
        self.acted.insert(unit);
        if self.selected == Some(unit) {
            self.selected = None;
        }
    }

    pub fn mark_moved(&mut self, unit: UnitId) {
        self.moved.insert(unit);
    }

    /// Enters `phase` with fresh per-turn flags.
    pub fn begin_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
        self.selected = None;
        self.acted.clear();
        self.moved.clear();
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
