//! Target selection.

use crate::state::{GameState, UnitState};

/// Nearest living opponent by Manhattan distance; ties go to roster order.
///
/// Vision is ignored: the AI always knows where everyone is.
pub fn select_target<'s>(state: &'s GameState, unit: &UnitState) -> Option<&'s UnitState> {
    state
        .roster
        .living(unit.side.opponent())
        .enumerate()
        .min_by_key(|(index, candidate)| (unit.position.manhattan(candidate.position), *index))
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClassOracle, StandardClasses};
    use crate::state::{MapDimensions, Position, Roster, Side, TileMap, UnitClass, UnitId};

    fn state(units: &[(Side, (i32, i32))]) -> GameState {
        let mut roster = Roster::new();
        for &(side, (x, y)) in units {
            roster.spawn(
                UnitClass::Pyro,
                side,
                Position::new(x, y),
                &StandardClasses.profile(UnitClass::Pyro),
            );
        }
        GameState::new(0, TileMap::new(MapDimensions::new(12, 12)), roster)
    }

    #[test]
    fn closer_target_wins() {
        let state = state(&[
            (Side::Player, (5, 0)),
            (Side::Player, (3, 0)),
            (Side::Enemy, (0, 0)),
        ]);
        let enemy = state.unit(UnitId(2)).unwrap();
        assert_eq!(select_target(&state, enemy).map(|u| u.id), Some(UnitId(1)));
    }

    #[test]
    fn ties_go_to_roster_order() {
        let state = state(&[
            (Side::Player, (0, 3)),
            (Side::Player, (3, 0)),
            (Side::Enemy, (0, 0)),
        ]);
        let enemy = state.unit(UnitId(2)).unwrap();
        assert_eq!(select_target(&state, enemy).map(|u| u.id), Some(UnitId(0)));
    }

    #[test]
    fn dead_players_are_ignored() {
        let mut state = state(&[(Side::Player, (1, 0)), (Side::Enemy, (0, 0))]);
        state.roster.unit_mut(UnitId(0)).unwrap().kill();
        let enemy = state.unit(UnitId(1)).unwrap();
        assert!(select_target(&state, enemy).is_none());
    }
}
