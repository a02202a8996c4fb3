//! Venue data model: rooms, floors and buildings.

use std::fmt;
use std::path::PathBuf;

/// A labeled location on a floor plan.
///
/// `x` and `y` are the label's anchor in the source document's coordinate
/// space. `name` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Room {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// How a floor's room set was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FloorStatus {
    /// The source document was parsed and its layer found.
    #[default]
    Loaded,
    /// The declared source document does not exist.
    MissingSource,
    /// The document parsed but has no annotation layer with the requested name.
    MissingLayer,
    /// The document is not well-formed markup.
    Malformed(String),
    /// The document exists but could not be read (a directory, no permission).
    Unreadable(String),
}

impl FloorStatus {
    /// Whether the floor's rooms could not be read.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, FloorStatus::Loaded)
    }
}

impl fmt::Display for FloorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorStatus::Loaded => f.write_str("loaded"),
            FloorStatus::MissingSource => f.write_str("source document missing"),
            FloorStatus::MissingLayer => f.write_str("annotation layer missing"),
            FloorStatus::Malformed(msg) => write!(f, "malformed document ({msg})"),
            FloorStatus::Unreadable(msg) => write!(f, "unreadable document ({msg})"),
        }
    }
}

/// One floor of a building, with the rooms found on its plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub name: String,
    /// Annotated vector drawing the rooms were read from.
    pub source_path: PathBuf,
    /// Raster image shown for this floor.
    pub image_path: PathBuf,
    /// Rooms in document order.
    pub rooms: Vec<Room>,
    pub status: FloorStatus,
}

impl Floor {
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}

/// A building and its floors, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub name: String,
    pub floors: Vec<Floor>,
    /// Floor shown when the building is opened. Always a valid index into `floors`.
    pub default_floor: usize,
}

impl Building {
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn default_floor(&self) -> Option<&Floor> {
        self.floors.get(self.default_floor)
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|f| f.rooms.len()).sum()
    }
}
