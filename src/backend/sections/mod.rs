//! Sections Module
//!
//! Sections are ordered within a page or within a template. Deleting a
//! section removes its components with it.

/// Database operations and the sibling kind
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::{SectionKind, SectionScope};
