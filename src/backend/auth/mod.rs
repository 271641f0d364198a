//! Authentication Module
//!
//! This module handles user registration, login and session tokens, and
//! the user data behind them.
//!
//! # Architecture
//!
//! - **`users`** - User rows and database operations
//! - **`sessions`** - JWT issuing and verification
//! - **`password`** - bcrypt hashing with the configured cost
//! - **`handlers`** - HTTP handlers for the `/api/auth` endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: email and password → user created → JWT returned
//! 2. **Login**: email and password → credentials verified → JWT returned
//! 3. **Profile**: JWT → verified by `require_auth` → user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Token lifetime comes from `JWT_EXPIRES_IN` (default 7 days)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use password::PasswordHasher;
pub use sessions::{Claims, TokenIssuer};
pub use users::UserRecord;
