//! Error types for roomfinder operations.

use thiserror::Error;

/// Errors that can occur while loading a venue or navigating it.
///
/// Degraded-but-usable conditions (a missing floor document, a missing
/// annotation layer, a label without text) are not errors; they surface as
/// [`FloorStatus`](crate::FloorStatus) values and log events instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Manifest parsing error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
