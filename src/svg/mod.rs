//! Room label extraction from annotated SVG floor plans.
//!
//! Floor plans are drawn in a vector editor with one group, the annotation
//! layer, holding a text label per room. The extractor finds that layer and
//! reads each label's text and anchor point.

mod parser;

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::Room;

pub use parser::{parse_labels, strip_bom};

/// Layer name used when none is configured.
pub const DEFAULT_LAYER: &str = "Rooms";

/// Attribute Inkscape stores layer names in.
pub const INKSCAPE_LABEL: &str = "inkscape:label";

/// Reads room labels out of one annotation layer.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    layer: String,
    layer_attribute: String,
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_LAYER)
    }
}

impl LabelExtractor {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            layer_attribute: INKSCAPE_LABEL.to_string(),
        }
    }

    /// Match layers on a different qualified attribute name (e.g. `id`).
    pub fn with_layer_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.layer_attribute = attribute.into();
        self
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn layer_attribute(&self) -> &str {
        &self.layer_attribute
    }

    /// Extract the rooms of a document. A document without the layer yields
    /// no rooms.
    ///
    /// The caller is responsible for checking that `path` exists; a missing
    /// file is reported as [`Error::Io`].
    pub fn extract(&self, path: impl AsRef<Path>) -> Result<Vec<Room>> {
        let path = path.as_ref();
        match self.extract_layer(path)? {
            Some(rooms) => Ok(rooms),
            None => {
                warn!(path = %path.display(), layer = %self.layer, "annotation layer not found");
                Ok(Vec::new())
            }
        }
    }

    /// Like [`extract`](Self::extract), but returns `None` when the layer is
    /// absent instead of an empty list.
    pub fn extract_layer(&self, path: impl AsRef<Path>) -> Result<Option<Vec<Room>>> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let content = String::from_utf8(strip_bom(&bytes).to_vec()).map_err(|e| {
            Error::MalformedDocument(format!("{}: {e}", path.display()))
        })?;

        self.parse(&content).map_err(|e| match e {
            Error::MalformedDocument(msg) => {
                Error::MalformedDocument(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Extract rooms from an in-memory document.
    pub fn parse(&self, content: &str) -> Result<Option<Vec<Room>>> {
        parser::scan(content, &self.layer, &self.layer_attribute)
    }
}

/// Extract the rooms in `layer` of the document at `path`.
pub fn extract(path: impl AsRef<Path>, layer: &str) -> Result<Vec<Room>> {
    LabelExtractor::new(layer).extract(path)
}
