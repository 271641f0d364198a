//! Shared Module
//!
//! Types that cross the HTTP boundary: request bodies, response models, the
//! response envelope, and the validation error they report.
//!
//! Nothing in here touches the database or the HTTP server, so request types
//! can be validated (and tested) in isolation before any handler logic runs.

/// Shared error types
pub mod error;

/// Field-level request checks
pub mod validation;

/// `{ success, data }` response envelope
pub mod envelope;

/// Resource models and request bodies
pub mod models;

pub use envelope::{ApiResponse, Deleted};
pub use error::SharedError;
