//! Error types for structure tree loading and export.
//!
//! Absence (an untagged document, an element without children, a missing
//! attribute) is never an error in this crate; it is reported through `Option`.
//! The variants below cover the object graph being malformed or unreachable.

use crate::object::ObjectRef;

/// Result type alias for structure tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a structure tree.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// Invalid PDF structure (generic)
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Referenced object not found by the object source
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Circular reference detected in the structure hierarchy
    #[error("Circular reference detected: object {0}")]
    CircularReference(ObjectRef),

    /// Structure nesting deeper than the configured limit
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
