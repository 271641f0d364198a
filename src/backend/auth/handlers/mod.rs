//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Current user and logout handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration (201)
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`profile`** - GET /api/auth/profile - Current user (bearer token required)
//! - **`logout`** - POST /api/auth/logout - Acknowledge logout

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Profile and logout handlers
pub mod profile;

pub use login::login;
pub use profile::{logout, profile};
pub use register::register;
