//! Users Module
//!
//! HTTP access to user accounts. The storage side lives in `auth::users`.

/// HTTP handlers
pub mod handlers;
