//! End-to-end tests: manifest → catalog → search → navigation.

use std::fs;

use tempfile::TempDir;

use roomfinder::{
    BuildingId, BuildingSpec, FloorCatalog, FloorId, FloorSpec, FloorStatus, Instruction, Manifest,
    Navigator, Room, Screen, build_catalog, resolve,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/venue");

fn fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURES_DIR, name)
}

fn fixture_index() -> roomfinder::VenueIndex {
    let manifest =
        Manifest::from_path(fixture_path("manifest.json")).expect("Failed to load manifest");
    build_catalog(&manifest).expect("Failed to build catalog")
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_fixture_catalog() {
    let index = fixture_index();

    let names: Vec<_> = index.buildings().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let a = &index.buildings()[0];
    assert_eq!(index.floors_of(a).len(), 3);
    assert_eq!(index.rooms_of(&a.floors[0]).len(), 3);
    assert_eq!(index.rooms_of(&a.floors[1]).len(), 2);

    let statuses: Vec<_> = index
        .degraded_floors()
        .map(|(_, floor)| floor.status.clone())
        .collect();
    assert_eq!(statuses.len(), 4);
    assert_eq!(statuses[0], FloorStatus::MissingSource); // A/2
    assert_eq!(statuses[1], FloorStatus::MissingSource); // B/-1
    assert_eq!(statuses[2], FloorStatus::MissingLayer); // B/1
    assert!(matches!(statuses[3], FloorStatus::Malformed(_))); // B/2

    assert_eq!(index.room_count(), 7);
}

#[test]
fn test_fixture_catalog_strict() {
    let manifest = Manifest::from_path(fixture_path("manifest.json")).unwrap();
    let result = FloorCatalog::new(&manifest).strict(true).build();
    assert!(matches!(result, Err(roomfinder::Error::MalformedDocument(_))));
}

#[test]
fn test_single_label_scenario() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("ground.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g inkscape:label="Rooms"><text x="10.0" y="20.0"><tspan>101</tspan></text></g>
</svg>"#,
    )
    .unwrap();

    let manifest = Manifest::new(vec![BuildingSpec::new(
        "A",
        vec![
            FloorSpec::new("Ground", "ground.svg", "ground.png"),
            FloorSpec::new("1", "first.svg", "first.png"),
        ],
    )])
    .with_base_dir(dir.path());

    let index = build_catalog(&manifest).unwrap();
    let found = resolve("101", &index).expect("room should be found");
    assert_eq!(found.building.name, "A");
    assert_eq!(found.floor.name, "Ground");
    assert_eq!(found.room, &Room::new("101", 10.0, 20.0));
}

#[test]
fn test_missing_source_scenario() {
    let dir = TempDir::new().unwrap();
    let manifest_path = dir.path().join("venue.json");
    fs::write(
        &manifest_path,
        r#"{"buildings": [{"name": "C", "floors": [
            {"name": "1", "source": "does/not/exist.svg", "image": "1.png"}
        ]}]}"#,
    )
    .unwrap();

    let manifest = Manifest::from_path(&manifest_path).unwrap();
    let index = build_catalog(&manifest).expect("missing documents are not fatal");
    let floor = &index.buildings()[0].floors[0];
    assert!(floor.rooms.is_empty());
    assert_eq!(floor.status, FloorStatus::MissingSource);
    assert!(resolve("C101", &index).is_none());
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_fixture_venue() {
    let index = fixture_index();

    let found = resolve("aula magna", &index).unwrap();
    assert_eq!((found.building.name.as_str(), found.floor.name.as_str()), ("A", "Ground"));
    assert_eq!((found.room.x, found.room.y), (45.5, 20.0));

    let found = resolve("b010", &index).unwrap();
    assert_eq!(found.building.name, "B");
    assert_eq!(found.floor.name, "Ground");

    // Rooms on the malformed floor are not indexed.
    assert!(resolve("B 210", &index).is_none());
}

#[test]
fn test_duplicate_name_resolves_to_first_building() {
    let index = fixture_index();
    let found = resolve("SHARED1", &index).unwrap();
    assert_eq!(found.building.name, "A");
    assert_eq!(found.floor.name, "1");
    assert_eq!(found.room.x, 60.0);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_session() {
    let index = fixture_index();
    let mut nav = Navigator::new(&index);

    // B opens at its declared default floor.
    nav.select_building(BuildingId(1)).unwrap();
    assert_eq!(nav.title().as_deref(), Some("B: Ground"));

    nav.select_floor(FloorId {
        building: BuildingId(1),
        floor: 0,
    })
    .unwrap();
    assert_eq!(nav.title().as_deref(), Some("B: -1"));

    // Search jumps across buildings.
    let instruction = nav.resolve_and_go("room 201");
    assert!(matches!(
        instruction,
        Instruction::ShowFloor {
            highlighted: Some(_),
            ..
        }
    ));
    assert_eq!(nav.title().as_deref(), Some("A: 1"));
    assert_eq!(nav.current_room().unwrap().name, "Room 201");

    // A failed search keeps the current floor.
    let screen = nav.screen();
    assert!(matches!(nav.resolve_and_go("Z 999"), Instruction::NotFound { .. }));
    assert_eq!(nav.screen(), screen);

    assert_eq!(nav.go_back(), Some(Instruction::ShowBuildingList));
    assert_eq!(nav.screen(), Screen::BuildingSelector);
    assert_eq!(nav.go_back(), None);
}

#[test]
fn test_demo_manifest_loads_without_assets() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/manifest.json");
    let manifest = Manifest::from_path(path).expect("Failed to load demo manifest");
    assert_eq!(manifest.buildings.len(), 3);

    // The map assets are not shipped, so every floor is empty but navigable.
    let index = build_catalog(&manifest).unwrap();
    assert_eq!(index.floor_count(), 16);
    assert_eq!(index.room_count(), 0);
    assert!(index
        .degraded_floors()
        .all(|(_, floor)| floor.status == FloorStatus::MissingSource));

    let mut nav = Navigator::new(&index);
    nav.select_building(BuildingId(2)).unwrap();
    assert_eq!(nav.title().as_deref(), Some("CNTI: 1"));
}
