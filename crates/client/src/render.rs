//! Plain-text board rendering limited by fog of war.
use std::collections::BTreeSet;
use std::fmt::Write;

use skirmish_core::{
    GameState, PickupKind, Position, Side, TerrainKind, UnitClass, UnitState,
};

pub const UNSEEN: char = ' ';

pub fn terrain_glyph(terrain: TerrainKind) -> char {
    match terrain {
        TerrainKind::Grass => '.',
        TerrainKind::Wall => '#',
        TerrainKind::Water => '~',
        TerrainKind::Mud => ',',
        TerrainKind::Lava => '^',
        TerrainKind::Road => '=',
        TerrainKind::Tree => 'T',
    }
}

pub fn pickup_glyph(pickup: PickupKind) -> char {
    match pickup {
        PickupKind::HealthPack => '+',
        PickupKind::Bomb => '*',
        PickupKind::AttackBoost => '!',
        PickupKind::DefenseBoost => '%',
    }
}

/// Players upper case, enemies lower case.
pub fn unit_glyph(unit: &UnitState) -> char {
    let glyph = match unit.class {
        UnitClass::Pyro => 'P',
        UnitClass::Medic => 'M',
        UnitClass::Sniper => 'S',
        UnitClass::Scout => 'C',
    };
    match unit.side {
        Side::Player => glyph,
        Side::Enemy => glyph.to_ascii_lowercase(),
    }
}

/// Draws the board as seen by `viewer`: tiles outside `visible` are blank and
/// concealed opponents are left out. The viewer's own units always show.
pub fn render_board(state: &GameState, viewer: Side, visible: &BTreeSet<Position>) -> String {
    let dimensions = state.map.dimensions();
    let mut out = String::with_capacity(dimensions.tile_count() + dimensions.height as usize);

    for y in 0..dimensions.height as i32 {
        for x in 0..dimensions.width as i32 {
            let position = Position::new(x, y);
            out.push(glyph_at(state, viewer, visible, position));
        }
        out.push('\n');
    }
    out
}

fn glyph_at(state: &GameState, viewer: Side, visible: &BTreeSet<Position>, position: Position) -> char {
    if let Some(unit) = state.roster.occupant_at(position) {
        let seen = unit.side == viewer
            || (visible.contains(&position) && !unit.is_hidden(&state.map));
        if seen {
            return unit_glyph(unit);
        }
    }
    if !visible.contains(&position) {
        return UNSEEN;
    }
    match state.map.tile_at(position) {
        Ok(tile) => tile.pickup.map_or_else(|| terrain_glyph(tile.terrain), pickup_glyph),
        Err(_) => UNSEEN,
    }
}

/// One line per living unit: glyph, id, class, position and health.
pub fn render_roster(state: &GameState) -> String {
    let mut out = String::new();
    for unit in state.roster.iter().filter(|unit| unit.is_alive()) {
        let _ = writeln!(
            out,
            "{} {} {:<6} {} hp {}/{} atk {} def {}",
            unit_glyph(unit),
            unit.id,
            unit.class,
            unit.position,
            unit.health,
            unit.max_health,
            unit.attack_power,
            unit.defense,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ClassOracle, MapDimensions, Roster, StandardClasses, TileMap};

    fn state_with(units: &[(UnitClass, Side, (i32, i32))], map: TileMap) -> GameState {
        let mut roster = Roster::new();
        for &(class, side, (x, y)) in units {
            roster.spawn(class, side, Position::new(x, y), &StandardClasses.profile(class));
        }
        GameState::new(0, map, roster)
    }

    #[test]
    fn fog_hides_distant_tiles_and_units() {
        let state = state_with(
            &[
                (UnitClass::Medic, Side::Player, (0, 0)),
                (UnitClass::Pyro, Side::Enemy, (1, 0)),
                (UnitClass::Scout, Side::Enemy, (3, 2)),
            ],
            TileMap::new(MapDimensions::new(4, 3)),
        );
        let visible = state.visible_tiles(Side::Player, 1);
        let board = render_board(&state, Side::Player, &visible);

        assert_eq!(board, "Mp  \n.   \n    \n");
    }

    #[test]
    fn concealed_enemies_stay_hidden_inside_vision() {
        let map = TileMap::parse(&["..T", "..."]).unwrap();
        let state = state_with(
            &[
                (UnitClass::Pyro, Side::Player, (0, 0)),
                (UnitClass::Sniper, Side::Enemy, (2, 0)),
            ],
            map,
        );
        let visible = state.visible_tiles(Side::Player, 5);
        let board = render_board(&state, Side::Player, &visible);

        assert_eq!(board.lines().next(), Some("P.T"));
    }

    #[test]
    fn roster_lists_only_the_living() {
        let mut state = state_with(
            &[
                (UnitClass::Sniper, Side::Player, (0, 0)),
                (UnitClass::Scout, Side::Enemy, (1, 1)),
            ],
            TileMap::new(MapDimensions::new(3, 3)),
        );
        for unit in state.roster.iter_mut().filter(|unit| unit.side == Side::Enemy) {
            unit.kill();
        }
        let listing = render_roster(&state);
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.starts_with("S #0 Sniper"));
    }
}
