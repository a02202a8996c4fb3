//! Exact room lookup by name.
//!
//! Queries and room names are compared after [`normalize`]: lower-cased with
//! every whitespace character removed, so "Room 101", "room101" and
//! " ROOM101 " are the same key. Only exact key matches count; room codes are
//! short and a partial match would point at the wrong room.
//!
//! Rooms are visited in a fixed order: buildings in manifest order, floors in
//! each building's declared order, rooms in document order. The first match
//! wins, so a name that appears on several floors always resolves to the same
//! one.

use std::fmt;

use crate::model::{Building, Floor, Room};
use crate::venue::{BuildingId, FloorId, RoomId, VenueIndex};

/// Canonical search key: lower-case, no whitespace.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A resolved room with its enclosing floor and building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomMatch<'a> {
    pub id: RoomId,
    pub building: &'a Building,
    pub floor: &'a Floor,
    pub room: &'a Room,
}

impl RoomMatch<'_> {
    pub fn building_id(&self) -> BuildingId {
        self.id.floor.building
    }

    pub fn floor_id(&self) -> FloorId {
        self.id.floor
    }
}

impl fmt::Display for RoomMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "room {} in building {}, floor {}",
            self.room.name, self.building.name, self.floor.name
        )
    }
}

/// Find the first room whose normalized name equals the normalized query.
pub fn resolve<'a>(query: &str, index: &'a VenueIndex) -> Option<RoomMatch<'a>> {
    let key = normalize(query);
    if key.is_empty() {
        return None;
    }

    let (id, room) = index.rooms().find(|(_, room)| normalize(&room.name) == key)?;
    let building = index.building(id.floor.building)?;
    let floor = index.floor(id.floor)?;
    Some(RoomMatch {
        id,
        building,
        floor,
        room,
    })
}
