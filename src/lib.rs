//! # roomfinder
//!
//! Room lookup over annotated SVG floor plans.
//!
//! ## Features
//!
//! - Read room labels (name and anchor point) from a named layer of an SVG
//!   floor plan
//! - Build a building → floor → room index from a JSON manifest
//! - Resolve free-text room queries with case- and space-insensitive exact
//!   matching
//! - Drive a building list / floor plan UI through a small state machine
//!
//! ## Quick Start
//!
//! ```no_run
//! use roomfinder::{Manifest, build_catalog, resolve};
//!
//! let manifest = Manifest::from_path("venue.json").unwrap();
//! let index = build_catalog(&manifest).unwrap();
//!
//! match resolve("Room 101", &index) {
//!     Some(found) => println!("{found} at ({}, {})", found.room.x, found.room.y),
//!     None => println!("room not found"),
//! }
//! ```
//!
//! ## Navigation
//!
//! [`Navigator`] tracks which screen is shown and returns an [`Instruction`]
//! per transition:
//!
//! ```
//! use roomfinder::{BuildingId, Instruction, Navigator, VenueIndex};
//!
//! let index = VenueIndex::default();
//! let mut nav = Navigator::new(&index);
//!
//! assert!(nav.select_building(BuildingId(0)).is_err());
//! assert!(matches!(nav.resolve_and_go("101"), Instruction::NotFound { .. }));
//! assert_eq!(nav.go_back(), None);
//! ```

pub mod error;
pub mod manifest;
pub mod model;
pub mod nav;
pub mod search;
pub mod svg;
pub mod venue;

pub use error::{Error, Result};
pub use manifest::{BuildingSpec, FloorSpec, Manifest};
pub use model::{Building, Floor, FloorStatus, Room};
pub use nav::{Instruction, NavigationView, Navigator, Screen};
pub use search::{RoomMatch, normalize, resolve};
pub use svg::{LabelExtractor, extract};
pub use venue::{BuildingId, FloorCatalog, FloorId, RoomId, VenueIndex, build_catalog};
