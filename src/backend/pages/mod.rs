//! Pages Module
//!
//! Pages are ordered within a website, carry a slug unique to that website,
//! and at most one of them is the home page.

/// Database operations and the sibling kind
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::{PageKind, PageScope};
