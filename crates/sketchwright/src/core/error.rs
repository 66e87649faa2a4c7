//! Core error types for document building and encoding
//!
//! Fatal failures are reported as [`SketchError`]. Problems that only cost a
//! single spec entry are reported as [`Diagnostic`] values next to the built
//! document instead.

use std::fmt;

use thiserror::Error;

/// Message returned when neither supported encoding could be read
pub const UNRECOGNIZED_FORMAT: &str = "Could not parse Excalidraw data. Make sure the file is a valid .excalidraw or .excalidraw.md file.";

/// Core error types for building, encoding and decoding documents
#[derive(Error, Debug)]
pub enum SketchError {
    #[error("Invalid spec JSON: {source}")]
    InvalidSpecJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl SketchError {
    /// Create a new invalid spec error from the underlying parse failure
    pub fn invalid_spec(source: serde_json::Error) -> Self {
        Self::InvalidSpecJson { source }
    }

    /// Create a new malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// The error returned when input matches no supported encoding
    pub fn unrecognized_format() -> Self {
        Self::malformed_input(UNRECOGNIZED_FORMAT)
    }

    /// Create a new serialization error
    pub fn serialization(source: serde_json::Error) -> Self {
        Self::Serialization { source }
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, SketchError>;

/// A non-fatal problem found while building a document
///
/// The offending spec entry is skipped or repaired and the build carries on.
/// `index` is the position of the entry in the spec's element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The entry's `type` is not one of the supported element types
    UnknownElementType { index: usize, element_type: String },
    /// An explicit id collided with one already in the document and was replaced
    DuplicateId { index: usize, id: String },
    /// Fewer than two points were given, so the default segment was used
    DegeneratePoints { index: usize, count: usize },
}

impl Diagnostic {
    /// Position of the spec entry this diagnostic refers to
    pub fn index(&self) -> usize {
        match self {
            Diagnostic::UnknownElementType { index, .. }
            | Diagnostic::DuplicateId { index, .. }
            | Diagnostic::DegeneratePoints { index, .. } => *index,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownElementType {
                index,
                element_type,
            } => write!(
                f,
                "Unknown element type: {} (element {}) - skipped",
                element_type, index
            ),
            Diagnostic::DuplicateId { index, id } => write!(
                f,
                "Duplicate element id: {} (element {}) - replaced with a fresh id",
                id, index
            ),
            Diagnostic::DegeneratePoints { index, count } => write!(
                f,
                "Expected at least 2 points, got {} (element {}) - using default segment",
                count, index
            ),
        }
    }
}
