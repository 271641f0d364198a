//! Middleware Module
//!
//! HTTP middleware applied in `routes`:
//!
//! - **`auth`** - Bearer-token check for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use sitebuilder::backend::middleware::require_auth;
//!
//! let protected = Router::new()
//!     .route("/api/auth/profile", get(profile))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser};
