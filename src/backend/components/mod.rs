//! Components Module
//!
//! Content blocks ordered within a section. Supports the full set of sibling
//! operations, including duplicate and move to another section.

/// Database operations and the sibling kind
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::{ComponentKind, ComponentScope};
