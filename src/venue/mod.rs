//! The venue hierarchy and the catalog build that produces it.

mod catalog;
mod index;

pub use catalog::{FloorCatalog, build_catalog};
pub use index::{BuildingId, FloorId, RoomId, VenueIndex};
