//! Sitebuilder - Website Builder Backend
//!
//! A JSON-over-HTTP backend for a website builder. Users own websites; a
//! website holds ordered pages, a page holds ordered sections, and a section
//! holds ordered components. Templates can own sections too, and image
//! metadata is tracked per user.
//!
//! # Module Structure
//!
//! - **`shared`** - Request/response models, validation and the response envelope
//!
//! - **`backend`** - Server-side code
//!   - Axum router and handlers for every resource
//!   - The ordered sibling engine that keeps `order` dense per parent
//!   - SQLite persistence through sqlx, JWT authentication
//!
//! # Ordering
//!
//! Pages, sections and components share one engine
//! ([`backend::ordering::SiblingStore`]). Within one parent, the positions of
//! N siblings are always exactly `0..N`. Every operation that moves more than
//! one sibling runs inside a single transaction.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sitebuilder::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
