//! Backend Error Module
//!
//! This module defines the error type shared by the data-access layer, the
//! ordering engine and the HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its constructors
//! └── conversion.rs - IntoResponse (JSON error envelope)
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` throughout. The status code comes
//! from `status_code()`; the body is `{"success": false, "error": "..."}`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, OrNotFound};
