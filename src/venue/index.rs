//! Read-only building → floor → room hierarchy.

use crate::model::{Building, Floor, Room};

/// Position of a building in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub usize);

/// Position of a floor within its building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorId {
    pub building: BuildingId,
    pub floor: usize,
}

/// Position of a room on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId {
    pub floor: FloorId,
    pub room: usize,
}

/// Every building of a venue with its parsed rooms.
///
/// Built once by [`FloorCatalog`](super::FloorCatalog) and never mutated
/// afterwards, so it can be shared freely between readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueIndex {
    buildings: Vec<Building>,
}

impl VenueIndex {
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    /// Buildings in manifest order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Floors of a building, bottom to top.
    pub fn floors_of<'a>(&self, building: &'a Building) -> &'a [Floor] {
        &building.floors
    }

    /// Rooms of a floor, in document order.
    pub fn rooms_of<'a>(&self, floor: &'a Floor) -> &'a [Room] {
        &floor.rooms
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.0)
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.building(id.building)?.floors.get(id.floor)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.floor(id.floor)?.rooms.get(id.room)
    }

    /// Look up a building by its exact display name.
    pub fn building_by_name(&self, name: &str) -> Option<(BuildingId, &Building)> {
        self.building_ids()
            .zip(&self.buildings)
            .find(|(_, b)| b.name == name)
    }

    pub fn building_ids(&self) -> impl Iterator<Item = BuildingId> + use<> {
        (0..self.buildings.len()).map(BuildingId)
    }

    /// Floor ids of a building, in declared order.
    pub fn floor_ids(&self, building: BuildingId) -> impl Iterator<Item = FloorId> + use<> {
        let count = self.building(building).map_or(0, |b| b.floors.len());
        (0..count).map(move |floor| FloorId { building, floor })
    }

    /// All rooms in traversal order: buildings, then floors, then rooms.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.buildings.iter().enumerate().flat_map(|(b, building)| {
            building.floors.iter().enumerate().flat_map(move |(f, floor)| {
                floor.rooms.iter().enumerate().map(move |(r, room)| {
                    let floor = FloorId {
                        building: BuildingId(b),
                        floor: f,
                    };
                    (RoomId { floor, room: r }, room)
                })
            })
        })
    }

    /// Floors whose rooms could not be read, with their ids.
    pub fn degraded_floors(&self) -> impl Iterator<Item = (FloorId, &Floor)> {
        self.buildings.iter().enumerate().flat_map(|(b, building)| {
            building
                .floors
                .iter()
                .enumerate()
                .filter(|(_, floor)| floor.status.is_degraded())
                .map(move |(f, floor)| {
                    (
                        FloorId {
                            building: BuildingId(b),
                            floor: f,
                        },
                        floor,
                    )
                })
        })
    }

    pub fn floor_count(&self) -> usize {
        self.buildings.iter().map(|b| b.floors.len()).sum()
    }

    pub fn room_count(&self) -> usize {
        self.buildings.iter().map(Building::room_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
