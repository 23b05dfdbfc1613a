//! Error types for bundled resource access.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while reading bundled resources.
#[derive(Error, Debug, Diagnostic)]
pub enum ResourceError {
    /// The resource does not exist under the resource root.
    #[error("resource not found: {path}")]
    #[diagnostic(code(dbkit::resources::not_found))]
    NotFound { path: String },

    /// Reading bytes or enumerating entries failed.
    #[error("failed to read resource: {path}")]
    #[diagnostic(code(dbkit::resources::read_error))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource path or its resolved location is malformed.
    #[error("invalid resource path `{path}`: {reason}")]
    #[diagnostic(
        code(dbkit::resources::invalid_path),
        help("resource paths are slash-separated and relative to the resource root")
    )]
    InvalidPath { path: String, reason: String },
}

impl ResourceError {
    /// Create a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a read error.
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Map an I/O error, turning `NotFound` into [`ResourceError::NotFound`].
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::read(path, source)
        }
    }

    /// Map a zip error, turning a missing entry into [`ResourceError::NotFound`].
    pub fn from_zip(path: impl Into<String>, source: zip::result::ZipError) -> Self {
        match source {
            zip::result::ZipError::FileNotFound => Self::not_found(path),
            zip::result::ZipError::Io(io) => Self::from_io(path, io),
            other => Self::read(path, std::io::Error::other(other)),
        }
    }

    /// Whether this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
