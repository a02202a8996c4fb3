//! Navigation between the building list and individual floor plans.
//!
//! [`Navigator`] is a small state machine over a borrowed [`VenueIndex`]. Each
//! transition returns an [`Instruction`] describing what the display should
//! show next; nothing here draws anything. A front end applies instructions
//! through [`Instruction::render`] and its own [`NavigationView`].

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Building, Floor, Room};
use crate::search::{RoomMatch, resolve};
use crate::venue::{BuildingId, FloorId, RoomId, VenueIndex};

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    BuildingSelector,
    Floor {
        floor: FloorId,
        highlighted: Option<RoomId>,
    },
}

/// What the display should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    ShowBuildingList,
    ShowFloor {
        floor: FloorId,
        highlighted: Option<RoomId>,
        /// The floor selector must be rebuilt (the building may have changed).
        refresh_selector: bool,
    },
    NotFound {
        query: String,
    },
}

/// Display surface driven by navigation.
pub trait NavigationView {
    fn show_building_list(&mut self, buildings: &[Building]);

    fn show_floor(&mut self, building: &Building, floor: &Floor, highlighted: Option<&Room>);

    fn show_floor_selector(&mut self, floors: &[Floor]);

    fn show_not_found(&mut self, query: &str);
}

impl Instruction {
    /// Apply this instruction to a view.
    pub fn render<V: NavigationView + ?Sized>(&self, index: &VenueIndex, view: &mut V) {
        match self {
            Instruction::ShowBuildingList => view.show_building_list(index.buildings()),
            Instruction::ShowFloor {
                floor,
                highlighted,
                refresh_selector,
            } => {
                let (Some(building), Some(current)) =
                    (index.building(floor.building), index.floor(*floor))
                else {
                    return;
                };
                let room = highlighted.and_then(|id| index.room(id));
                view.show_floor(building, current, room);
                if *refresh_selector {
                    view.show_floor_selector(building.floors());
                }
            }
            Instruction::NotFound { query } => view.show_not_found(query),
        }
    }
}

/// Navigation session over one venue.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    index: &'a VenueIndex,
    screen: Screen,
}

impl<'a> Navigator<'a> {
    /// Start a session at the building selector.
    pub fn new(index: &'a VenueIndex) -> Self {
        Self {
            index,
            screen: Screen::BuildingSelector,
        }
    }

    pub fn index(&self) -> &'a VenueIndex {
        self.index
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn current_building(&self) -> Option<&'a Building> {
        match self.screen {
            Screen::Floor { floor, .. } => self.index.building(floor.building),
            Screen::BuildingSelector => None,
        }
    }

    pub fn current_floor(&self) -> Option<&'a Floor> {
        match self.screen {
            Screen::Floor { floor, .. } => self.index.floor(floor),
            Screen::BuildingSelector => None,
        }
    }

    pub fn current_room(&self) -> Option<&'a Room> {
        match self.screen {
            Screen::Floor {
                highlighted: Some(room),
                ..
            } => self.index.room(room),
            _ => None,
        }
    }

    /// Header text for the floor screen, e.g. "Building A: 2".
    pub fn title(&self) -> Option<String> {
        let building = self.current_building()?;
        let floor = self.current_floor()?;
        Some(format!("{}: {}", building.name, floor.name))
    }

    /// Open a building at its default floor.
    pub fn select_building(&mut self, id: BuildingId) -> Result<Instruction> {
        if self.screen != Screen::BuildingSelector {
            return Err(Error::InvalidTransition(
                "buildings can only be selected from the building list".into(),
            ));
        }
        let building = self
            .index
            .building(id)
            .ok_or_else(|| Error::InvalidTransition(format!("no building {}", id.0)))?;
        if building.default_floor().is_none() {
            return Err(Error::InvalidTransition(format!(
                "building '{}' has no floors",
                building.name
            )));
        }

        let floor = FloorId {
            building: id,
            floor: building.default_floor,
        };
        debug!(building = %building.name, floor = floor.floor, "select building");
        Ok(self.go_to(floor, None, true))
    }

    /// Switch to another floor of the current building.
    pub fn select_floor(&mut self, floor: FloorId) -> Result<Instruction> {
        let Screen::Floor { floor: current, .. } = self.screen else {
            return Err(Error::InvalidTransition("no building is open".into()));
        };
        if floor.building != current.building {
            return Err(Error::InvalidTransition(
                "floor belongs to another building".into(),
            ));
        }
        if self.index.floor(floor).is_none() {
            return Err(Error::InvalidTransition(format!(
                "no floor {} in this building",
                floor.floor
            )));
        }

        debug!(floor = floor.floor, "select floor");
        Ok(self.go_to(floor, None, false))
    }

    /// Look up `query` and jump to the matching room from any screen.
    ///
    /// Returns [`Instruction::NotFound`] and leaves the state unchanged when
    /// nothing matches.
    pub fn resolve_and_go(&mut self, query: &str) -> Instruction {
        match resolve(query, self.index) {
            Some(found) => self.go_to_match(&found),
            None => {
                debug!(query, "room not found");
                Instruction::NotFound {
                    query: query.to_string(),
                }
            }
        }
    }

    /// Return to the building list. No-op at the building list.
    pub fn go_back(&mut self) -> Option<Instruction> {
        match self.screen {
            Screen::BuildingSelector => None,
            Screen::Floor { .. } => {
                debug!("back to building list");
                self.screen = Screen::BuildingSelector;
                Some(Instruction::ShowBuildingList)
            }
        }
    }

    fn go_to_match(&mut self, found: &RoomMatch<'_>) -> Instruction {
        debug!(%found, "room found");
        self.go_to(found.floor_id(), Some(found.id), true)
    }

    fn go_to(
        &mut self,
        floor: FloorId,
        highlighted: Option<RoomId>,
        refresh_selector: bool,
    ) -> Instruction {
        self.screen = Screen::Floor { floor, highlighted };
        Instruction::ShowFloor {
            floor,
            highlighted,
            refresh_selector,
        }
    }
}
