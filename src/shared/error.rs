//! Shared Error Types
//!
//! This module defines the errors raised while checking request payloads,
//! before any data-access code runs. The backend wraps them into
//! `BackendError` so handlers can return them directly.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed a format or range check
//! - `SerializationError` - JSON encoding/decoding of an opaque payload failed
//!
//! # Usage
//!
//! ```rust
//! use sitebuilder::shared::error::SharedError;
//!
//! let error = SharedError::validation("slug", "Slug must be lowercase words separated by dashes");
//! ```
use thiserror::Error;

/// Errors produced while checking request payloads
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
