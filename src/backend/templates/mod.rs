//! Templates Module
//!
//! Reusable site blueprints, public or owned by a user.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;
