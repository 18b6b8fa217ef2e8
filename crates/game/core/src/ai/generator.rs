//! Single-step movement candidates.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::action::CardinalDirection;
use crate::state::{GameState, UnitState};

/// The four cardinal steps, closest-to-target first.
///
/// Sorting is stable, so equal distances keep the N, S, W, E order.
pub fn step_candidates(unit: &UnitState, target: &UnitState) -> ArrayVec<CardinalDirection, 4> {
    let mut candidates: ArrayVec<(CardinalDirection, u32), 4> = CardinalDirection::ALL
        .iter()
        .map(|&direction| {
            let (dx, dy) = direction.delta();
            let landing = unit.position.offset(dx, dy);
            (direction, landing.manhattan(target.position))
        })
        .collect();
    candidates.sort_by_key(|&(_, distance)| distance);
    candidates.into_iter().map(|(direction, _)| direction).collect()
}

/// First candidate that is in bounds, passable, free and not the target's tile.
///
/// Greedy: no path planning around obstacles.
pub fn choose_step(
    state: &GameState,
    unit: &UnitState,
    target: &UnitState,
) -> Option<CardinalDirection> {
    step_candidates(unit, target).into_iter().find(|&direction| {
        let (dx, dy) = direction.delta();
        let landing = unit.position.offset(dx, dy);
        let open = landing != target.position
            && state.map.is_passable(landing, unit.class)
            && !state.roster.is_occupied(landing);
        trace!(unit = %unit.id, %direction, %landing, open, "evaluated step");
        open
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClassOracle, StandardClasses};
    use crate::state::{Position, Roster, Side, TileMap, UnitClass, UnitId};

    fn state(rows: &[&str], units: &[(UnitClass, Side, (i32, i32))]) -> GameState {
        let mut roster = Roster::new();
        for &(class, side, (x, y)) in units {
            roster.spawn(class, side, Position::new(x, y), &StandardClasses.profile(class));
        }
        GameState::new(0, TileMap::parse(rows).unwrap(), roster)
    }

    #[test]
    fn closest_steps_come_first() {
        let state = state(
            &["....", "....", "....", "...."],
            &[
                (UnitClass::Pyro, Side::Player, (3, 3)),
                (UnitClass::Pyro, Side::Enemy, (0, 0)),
            ],
        );
        let enemy = state.unit(UnitId(1)).unwrap();
        let player = state.unit(UnitId(0)).unwrap();
        let order: Vec<_> = step_candidates(enemy, player).into_iter().collect();
        assert_eq!(
            order,
            vec![
                CardinalDirection::South,
                CardinalDirection::East,
                CardinalDirection::North,
                CardinalDirection::West,
            ]
        );
    }

    #[test]
    fn blocked_steps_fall_through() {
        let state = state(
            &[".#..", "....", "....", "...."],
            &[
                (UnitClass::Pyro, Side::Player, (3, 0)),
                (UnitClass::Scout, Side::Enemy, (0, 0)),
            ],
        );
        let enemy = state.unit(UnitId(1)).unwrap();
        let player = state.unit(UnitId(0)).unwrap();
        assert_eq!(choose_step(&state, enemy, player), Some(CardinalDirection::South));
    }

    #[test]
    fn never_steps_onto_the_target() {
        let state = state(
            &["~.", "~~"],
            &[
                (UnitClass::Pyro, Side::Player, (1, 0)),
                (UnitClass::Scout, Side::Enemy, (0, 0)),
            ],
        );
        let enemy = state.unit(UnitId(1)).unwrap();
        let player = state.unit(UnitId(0)).unwrap();
        assert_eq!(choose_step(&state, enemy, player), None);
    }
}
