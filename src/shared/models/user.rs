//! User and authentication payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{require_email, require_optional_length, require_strong_password};

/// A user as returned to clients (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Sign-in method; always `email` for accounts created here
    pub provider: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Body of `PUT /api/users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_email("email", &self.email)?;
        require_strong_password("password", &self.password)?;
        require_optional_length("name", self.name.as_deref(), 1, 100)
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_email("email", &self.email)?;
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "is required"));
        }
        Ok(())
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("name", self.name.as_deref(), 1, 100)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        Ok(())
    }
}
