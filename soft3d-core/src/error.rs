use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading mesh geometry.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A `v` or `f` statement could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The mesh file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A face refers to a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },

    /// A face with fewer than two indices.
    #[error("face {face} has {len} indices, at least 2 are required")]
    FaceTooShort { face: usize, len: usize },

    /// Per-face attribute list of the wrong length.
    #[error("expected {expected} face {what}, got {actual}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Failure reported by a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failure while emitting one object to a surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw face {face}: {source}")]
    Face {
        face: usize,
        #[source]
        source: SurfaceError,
    },

    #[error("failed to draw marker for vertex {vertex}: {source}")]
    Marker {
        vertex: usize,
        #[source]
        source: SurfaceError,
    },
}
