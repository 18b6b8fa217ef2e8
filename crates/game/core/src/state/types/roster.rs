use crate::env::ClassProfile;
use crate::state::{Position, Side, UnitClass, UnitId, UnitState};

/// Two ordered squads. Units are never removed; the dead are filtered out of
/// the living views. Order within a side is the acting order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    players: Vec<UnitState>,
    enemies: Vec<UnitState>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit built from `profile` and returns its id.
    pub fn spawn(
        &mut self,
        class: UnitClass,
        side: Side,
        position: Position,
        profile: &ClassProfile,
    ) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        let unit = UnitState::from_profile(id, class, side, position, profile);
        self.side_mut(side).push(unit);
        id
    }

    pub fn side(&self, side: Side) -> &[UnitState] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<UnitState> {
        match side {
            Side::Player => &mut self.players,
            Side::Enemy => &mut self.enemies,
        }
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &UnitState> {
        self.side(side).iter().filter(|unit| unit.is_alive())
    }

    /// Players first, then enemies.
    pub fn iter(&self) -> impl Iterator<Item = &UnitState> {
        self.players.iter().chain(self.enemies.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut UnitState> {
        self.players.iter_mut().chain(self.enemies.iter_mut())
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.iter_mut().find(|unit| unit.id == id)
    }

    /// The living unit standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<&UnitState> {
        self.iter()
            .find(|unit| unit.is_alive() && unit.position == position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant_at(position).is_some()
    }

    /// True when every unit of `side` is dead (or the side is empty).
    pub fn is_wiped_out(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
