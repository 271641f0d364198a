//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation
//! ├── api_routes.rs     - Auth, user and image endpoints
//! └── content_routes.rs - Websites, pages, sections, components, templates
//! ```
//!
//! All endpoints live under `/api`. Only `GET /api/auth/profile` requires a
//! bearer token.
//!
//! # Example
//!
//! ```rust,ignore
//! use sitebuilder::backend::routes::create_router;
//!
//! let app = create_router(app_state);
//! axum::serve(listener, app).await?;
//! ```

/// Main router creation
pub mod router;

/// Auth, user and image routes
pub mod api_routes;

/// Site tree and template routes
pub mod content_routes;

pub use router::create_router;
