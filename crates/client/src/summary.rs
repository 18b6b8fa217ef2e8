//! Machine-readable match summary.
use serde::Serialize;
use skirmish_core::{GameState, GameStatus, Position, Side, UnitClass, UnitId};

#[derive(Clone, Debug, Serialize)]
pub struct UnitSummary {
    pub id: UnitId,
    pub class: UnitClass,
    pub side: Side,
    pub position: Position,
    pub health: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub status: GameStatus,
    pub rounds: u32,
    pub actions: u64,
    pub survivors: Vec<UnitSummary>,
}

impl MatchSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            seed: state.game_seed,
            status: state.status(),
            rounds: state.turn.round,
            actions: state.turn.nonce,
            survivors: state
                .roster
                .iter()
                .filter(|unit| unit.is_alive())
                .map(|unit| UnitSummary {
                    id: unit.id,
                    class: unit.class,
                    side: unit.side,
                    position: unit.position,
                    health: unit.health,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ClassOracle, MapDimensions, Roster, StandardClasses, TileMap};

    #[test]
    fn summary_counts_survivors() {
        let mut roster = Roster::new();
        let profile = StandardClasses.profile(UnitClass::Medic);
        roster.spawn(UnitClass::Medic, Side::Player, Position::ORIGIN, &profile);
        roster.spawn(UnitClass::Medic, Side::Enemy, Position::new(2, 2), &profile);
        let mut state = GameState::new(42, TileMap::new(MapDimensions::new(4, 4)), roster);
        for unit in state.roster.iter_mut().filter(|unit| unit.side == Side::Enemy) {
            unit.kill();
        }

        let summary = MatchSummary::from_state(&state);
        assert_eq!(summary.status, GameStatus::Victory);
        assert_eq!(summary.survivors.len(), 1);

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"seed\":42"));
        assert!(json.contains("\"status\":\"Victory\""));
    }
}
