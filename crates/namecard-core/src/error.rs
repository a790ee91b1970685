//! Error handling for the namecard editor
//!
//! Errors are split by the layer that raises them:
//! - Template errors (whole-payload import/export failures)
//! - Object errors (per-object reconstruction problems, recovered locally)
//! - Document errors (mutations that target a stale object)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Template error type
///
/// Raised when a template payload cannot be applied as a whole. A failed
/// import never touches the live document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Missing or malformed top-level structure
    #[error("Invalid template payload: {reason}")]
    InvalidPayload {
        /// What was wrong with the payload.
        reason: String,
    },

    /// A `formatVersion` is present but not one this build understands
    #[error("Unsupported template format version: {version}")]
    UnsupportedFormatVersion {
        /// The version string found in the payload.
        version: String,
    },

    /// An image referenced by the template could not be decoded
    #[error("Failed to load asset {source_ref}: {reason}")]
    AssetLoadFailed {
        /// The image reference that failed.
        source_ref: String,
        /// Decoder-provided failure reason.
        reason: String,
    },

    /// A newer load or a clear happened while this one was in flight
    #[error("Template load {generation} was superseded")]
    Superseded {
        /// The generation token of the abandoned load.
        generation: u64,
    },
}

impl TemplateError {
    /// Shorthand for an `InvalidPayload` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        TemplateError::InvalidPayload {
            reason: reason.into(),
        }
    }
}

/// Object error type
///
/// Per-object reconstruction failures. These are logged, collected into the
/// import report and skipped; the rest of the load continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjectError {
    /// The object's kind tag is not one the loader can construct
    #[error("Unsupported object kind '{kind}' at index {index}")]
    UnsupportedObjectKind {
        /// Position of the object in the payload's `objects` array.
        index: usize,
        /// The unrecognized kind tag.
        kind: String,
    },

    /// The kind is known but its attributes could not be read
    #[error("Malformed {kind} object at index {index}: {reason}")]
    MalformedObject {
        /// Position of the object in the payload's `objects` array.
        index: usize,
        /// The object's kind tag.
        kind: String,
        /// Why reconstruction failed.
        reason: String,
    },
}

impl ObjectError {
    /// Index of the offending object in the payload.
    pub fn index(&self) -> usize {
        match self {
            ObjectError::UnsupportedObjectKind { index, .. }
            | ObjectError::MalformedObject { index, .. } => *index,
        }
    }
}

/// Document error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The mutation targeted an object that is not in the document
    #[error("Object {id} not found")]
    ObjectNotFound {
        /// The stale object id.
        id: u64,
    },
}

/// Main error type for the namecard editor
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Object error
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a stale-object error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Document(DocumentError::ObjectNotFound { .. }))
    }

    /// Check if this is an asset loading failure
    pub fn is_asset_failure(&self) -> bool {
        matches!(self, Error::Template(TemplateError::AssetLoadFailed { .. }))
    }

    /// Check if this is a template-level error
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::Template(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
