//! Venue manifest: the buildings, floors and floor-plan files of a deployment.
//!
//! The manifest is plain configuration supplied by the integrator. It names
//! documents but says nothing about the rooms in them; those are attached when
//! the catalog is built.
//!
//! ```json
//! {
//!   "layer": "Rooms",
//!   "buildings": [
//!     {
//!       "name": "Building A",
//!       "default_floor": 0,
//!       "floors": [
//!         { "name": "Ground", "source": "maps/A/0.svg", "image": "maps/A/0.png" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::svg::DEFAULT_LAYER;

/// Top-level venue description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Annotation layer holding room labels in every floor document.
    #[serde(default = "default_layer")]
    pub layer: String,
    pub buildings: Vec<BuildingSpec>,
    /// Directory relative floor paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A building, with floors listed bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub name: String,
    pub floors: Vec<FloorSpec>,
    #[serde(default)]
    pub default_floor: usize,
}

/// One floor's documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub name: String,
    /// Annotated SVG the rooms are read from.
    pub source: PathBuf,
    /// Raster image displayed for the floor.
    pub image: PathBuf,
}

fn default_layer() -> String {
    DEFAULT_LAYER.to_string()
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            layer: default_layer(),
            buildings: Vec::new(),
            base_dir: None,
        }
    }
}

impl Manifest {
    pub fn new(buildings: Vec<BuildingSpec>) -> Self {
        Self {
            buildings,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a JSON manifest from disk. Relative floor paths resolve against
    /// the manifest's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut manifest = Self::from_json(&content)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        Ok(manifest)
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Check the invariants the catalog and navigation rely on.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for building in &self.buildings {
            if building.name.trim().is_empty() {
                return Err(Error::InvalidManifest("building with empty name".into()));
            }
            if !seen.insert(building.name.as_str()) {
                return Err(Error::InvalidManifest(format!(
                    "duplicate building '{}'",
                    building.name
                )));
            }
            if building.floors.is_empty() {
                return Err(Error::InvalidManifest(format!(
                    "building '{}' declares no floors",
                    building.name
                )));
            }
            if building.default_floor >= building.floors.len() {
                return Err(Error::InvalidManifest(format!(
                    "building '{}' default floor {} out of range (has {} floors)",
                    building.name,
                    building.default_floor,
                    building.floors.len()
                )));
            }
        }
        Ok(())
    }
}

impl BuildingSpec {
    pub fn new(name: impl Into<String>, floors: Vec<FloorSpec>) -> Self {
        Self {
            name: name.into(),
            floors,
            default_floor: 0,
        }
    }

    pub fn with_default_floor(mut self, index: usize) -> Self {
        self.default_floor = index;
        self
    }
}

impl FloorSpec {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        image: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            image: image.into(),
        }
    }
}
