//! Integration tests
//!
//! Full HTTP round trips against an in-memory database.

mod api;
