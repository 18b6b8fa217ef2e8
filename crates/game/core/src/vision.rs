//! Fog of war.
//!
//! Presentation asks which tiles a side can see; nothing else in the rules
//! consults vision. The enemy AI deliberately targets with full information.

use std::collections::BTreeSet;

use crate::state::{Position, TileMap, UnitState};

/// Union of in-bounds tiles within `radius` (Euclidean, `dx² + dy² <= r²`)
/// of every living unit yielded by `units`.
pub fn visible_tiles<'a>(
    map: &TileMap,
    units: impl IntoIterator<Item = &'a UnitState>,
    radius: u32,
) -> BTreeSet<Position> {
    // No in-bounds tile is farther than the longer map side on either axis.
    let dims = map.dimensions();
    let reach = radius.min(dims.width.max(dims.height)) as i32;
    let radius_sq = radius.saturating_mul(radius);
    let mut visible = BTreeSet::new();

    for unit in units.into_iter().filter(|unit| unit.is_alive()) {
        let origin = unit.position;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let tile = origin.offset(dx, dy);
                if map.contains(tile) && origin.distance_sq(tile) <= radius_sq {
                    visible.insert(tile);
                }
            }
        }
    }
    visible
}
