//! Websites Module
//!
//! A website owns an ordered list of pages; see `backend::pages`.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;
