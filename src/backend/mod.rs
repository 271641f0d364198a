//! Backend Module
//!
//! Server-side code for the website builder API.
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, application state, startup
//! - **`routes`** - Router assembly
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - `BackendError` and its HTTP mapping
//! - **`db`** - Connection pool and retried transactions
//! - **`ordering`** - Dense sibling ordering shared by pages, sections, components
//! - **`auth`** - Registration, login, tokens, password hashing, user storage
//! - **`users`** - User lookup and update endpoints
//! - **`websites`**, **`pages`**, **`sections`**, **`components`** - The site tree
//! - **`templates`** - Reusable section collections
//! - **`images`** - Image metadata

pub mod auth;
pub mod components;
pub mod db;
pub mod error;
pub mod images;
pub mod middleware;
pub mod ordering;
pub mod pages;
pub mod routes;
pub mod sections;
pub mod server;
pub mod templates;
pub mod users;
pub mod websites;


pub use error::BackendError;
pub use server::create_app;
