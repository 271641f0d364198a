//! Images Module
//!
//! Metadata for images hosted elsewhere: listing, search, statistics and
//! bulk deletion.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;
