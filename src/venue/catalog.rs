//! Catalog build: attach parsed rooms to every floor in a manifest.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::manifest::{FloorSpec, Manifest};
use crate::model::{Building, Floor, FloorStatus};
use crate::svg::LabelExtractor;

use super::VenueIndex;

/// Builds a [`VenueIndex`] from a manifest by parsing every floor document.
///
/// The build is eager: all floors are read before `build` returns. Missing
/// documents and missing layers leave a floor with no rooms. Malformed or
/// unreadable documents do the same unless [`strict`](Self::strict) is set,
/// in which case the build stops at the first one.
#[derive(Debug, Clone)]
pub struct FloorCatalog<'a> {
    manifest: &'a Manifest,
    extractor: LabelExtractor,
    base_dir: Option<PathBuf>,
    strict: bool,
}

impl<'a> FloorCatalog<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            extractor: LabelExtractor::new(manifest.layer.clone()),
            base_dir: manifest.base_dir.clone(),
            strict: false,
        }
    }

    /// Read rooms from a different layer than the manifest names.
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        let attribute = self.extractor.layer_attribute().to_string();
        self.extractor = LabelExtractor::new(layer).with_layer_attribute(attribute);
        self
    }

    pub fn with_extractor(mut self, extractor: LabelExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Resolve relative floor paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Fail the build on the first malformed or unreadable document.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(&self) -> Result<VenueIndex> {
        self.manifest.validate()?;

        let mut buildings = Vec::with_capacity(self.manifest.buildings.len());
        for spec in &self.manifest.buildings {
            let floors = spec
                .floors
                .iter()
                .map(|floor| self.populate_floor(floor))
                .collect::<Result<Vec<_>>>()?;

            buildings.push(Building {
                name: spec.name.clone(),
                floors,
                default_floor: spec.default_floor,
            });
        }

        let index = VenueIndex::new(buildings);
        info!(
            buildings = index.buildings().len(),
            floors = index.floor_count(),
            rooms = index.room_count(),
            degraded = index.degraded_floors().count(),
            "venue catalog loaded"
        );
        Ok(index)
    }

    /// Parse one floor's document and return the floor with its rooms.
    pub fn populate_floor(&self, spec: &FloorSpec) -> Result<Floor> {
        let source_path = self.resolve(&spec.source);
        let image_path = self.resolve(&spec.image);
        let mut floor = Floor {
            name: spec.name.clone(),
            source_path,
            image_path,
            rooms: Vec::new(),
            status: FloorStatus::Loaded,
        };

        if !floor.source_path.exists() {
            warn!(
                floor = %floor.name,
                path = %floor.source_path.display(),
                "floor document does not exist"
            );
            floor.status = FloorStatus::MissingSource;
            return Ok(floor);
        }

        match self.extractor.extract_layer(&floor.source_path) {
            Ok(Some(rooms)) => floor.rooms = rooms,
            Ok(None) => {
                warn!(
                    floor = %floor.name,
                    path = %floor.source_path.display(),
                    layer = %self.extractor.layer(),
                    "annotation layer not found"
                );
                floor.status = FloorStatus::MissingLayer;
            }
            Err(Error::MalformedDocument(msg)) if !self.strict => {
                error!(floor = %floor.name, "skipping malformed floor document: {msg}");
                floor.status = FloorStatus::Malformed(msg);
            }
            Err(Error::Io(e)) if !self.strict => {
                error!(
                    floor = %floor.name,
                    path = %floor.source_path.display(),
                    "skipping unreadable floor document: {e}"
                );
                floor.status = FloorStatus::Unreadable(e.to_string());
            }
            Err(e) => return Err(e),
        }
        Ok(floor)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Build the venue index for `manifest`, skipping unreadable floors.
pub fn build_catalog(manifest: &Manifest) -> Result<VenueIndex> {
    FloorCatalog::new(manifest).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::BuildingSpec;
    use crate::model::Room;
    use std::fs;
    use tempfile::TempDir;

    const GROUND: &str = r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g inkscape:label="Rooms"><text x="10" y="20"><tspan>101</tspan></text></g>
  <g inkscape:label="Labels"><text x="1" y="2"><tspan>Exit</tspan></text></g>
</svg>"#;

    fn venue(dir: &TempDir) -> Manifest {
        fs::write(dir.path().join("0.svg"), GROUND).unwrap();
        fs::write(dir.path().join("bad.svg"), "<svg><g></svg>").unwrap();
        fs::write(dir.path().join("plain.svg"), "<svg/>").unwrap();

        Manifest::new(vec![BuildingSpec::new(
            "A",
            vec![
                FloorSpec::new("Ground", "0.svg", "0.png"),
                FloorSpec::new("1", "1.svg", "1.png"),
                FloorSpec::new("2", "bad.svg", "2.png"),
                FloorSpec::new("3", "plain.svg", "3.png"),
            ],
        )])
        .with_base_dir(dir.path())
    }

    #[test]
    fn test_build_lenient() {
        let dir = TempDir::new().unwrap();
        let manifest = venue(&dir);
        let index = build_catalog(&manifest).unwrap();

        let floors = index.buildings()[0].floors();
        assert_eq!(floors[0].rooms, vec![Room::new("101", 10.0, 20.0)]);
        assert_eq!(floors[0].status, FloorStatus::Loaded);
        assert_eq!(floors[0].image_path, dir.path().join("0.png"));
        assert_eq!(floors[1].status, FloorStatus::MissingSource);
        assert!(matches!(floors[2].status, FloorStatus::Malformed(_)));
        assert_eq!(floors[3].status, FloorStatus::MissingLayer);
        assert!(floors[1..].iter().all(|f| f.rooms.is_empty()));
        assert_eq!(index.degraded_floors().count(), 3);
    }

    #[test]
    fn test_build_strict_fails_on_malformed() {
        let dir = TempDir::new().unwrap();
        let manifest = venue(&dir);
        let result = FloorCatalog::new(&manifest).strict(true).build();
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_unreadable_floor_does_not_stop_build() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("0.svg"), GROUND).unwrap();
        fs::create_dir(dir.path().join("1.svg")).unwrap();
        let manifest = Manifest::new(vec![BuildingSpec::new(
            "A",
            vec![
                FloorSpec::new("Ground", "0.svg", "0.png"),
                FloorSpec::new("1", "1.svg", "1.png"),
            ],
        )])
        .with_base_dir(dir.path());

        let index = build_catalog(&manifest).unwrap();
        let floors = index.buildings()[0].floors();
        assert_eq!(floors[0].rooms, vec![Room::new("101", 10.0, 20.0)]);
        assert!(matches!(floors[1].status, FloorStatus::Unreadable(_)));
        assert!(floors[1].rooms.is_empty());
        assert_eq!(index.degraded_floors().count(), 1);

        let result = FloorCatalog::new(&manifest).strict(true).build();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_with_layer_override() {
        let dir = TempDir::new().unwrap();
        let manifest = venue(&dir);
        let index = FloorCatalog::new(&manifest)
            .with_layer("Labels")
            .build()
            .unwrap();
        assert_eq!(index.buildings()[0].floors[0].rooms[0].name, "Exit");
    }

    #[test]
    fn test_base_dir_override() {
        let dir = TempDir::new().unwrap();
        let mut manifest = venue(&dir);
        manifest.base_dir = None;

        let without = build_catalog(&manifest).unwrap();
        assert_eq!(without.room_count(), 0);

        let with = FloorCatalog::new(&manifest)
            .with_base_dir(dir.path())
            .build()
            .unwrap();
        assert_eq!(with.room_count(), 1);
    }

    #[test]
    fn test_build_rejects_invalid_manifest() {
        let manifest = Manifest::new(vec![BuildingSpec::new("A", vec![])]);
        assert!(matches!(
            build_catalog(&manifest),
            Err(Error::InvalidManifest(_))
        ));
    }
}
