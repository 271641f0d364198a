/**
 * User Model and Database Operations
 *
 * This module handles the `users` table. `UserRecord` is the full row
 * including the password hash; it is converted to the public `User` before
 * leaving the backend.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{BackendError, OrNotFound};
use crate::shared::models::user::{UpdateUserRequest, User};

/// Provider recorded for accounts registered with email and password
pub const EMAIL_PROVIDER: &str = "email";

const EMAIL_TAKEN: &str = "This email is already in use";

/// User row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt); absent for accounts without a password
    pub password_hash: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Sign-in method
    pub provider: String,
    /// Whether the email address has been confirmed
    pub is_verified: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            email: record.email,
            name: record.name,
            provider: record.provider,
            is_verified: record.is_verified,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, name, provider, is_verified, created_at, updated_at";

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email
/// * `password_hash` - Hashed password
/// * `name` - Optional display name
///
/// # Returns
/// Created user or error
///
/// # Errors
/// `Validation` if the email is already registered
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: Option<&str>,
) -> Result<UserRecord, BackendError> {
    if get_user_by_email(pool, email).await?.is_some() {
        return Err(BackendError::validation("email", EMAIL_TAKEN));
    }

    let id = Uuid::new_v4();
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO users (id, email, password_hash, name, provider, is_verified, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 0, ?, ?)
        RETURNING {}
        "#,
        USER_COLUMNS
    );

    let user = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(EMAIL_PROVIDER)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRecord>, BackendError> {
    let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<UserRecord>, BackendError> {
    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Update a user's name and/or email
///
/// # Errors
/// * `NotFound` - No such user
/// * `Validation` - The new email belongs to another user
pub async fn update_user(pool: &SqlitePool, id: Uuid, request: &UpdateUserRequest) -> Result<UserRecord, BackendError> {
    get_user_by_id(pool, id).await?.or_not_found("User", id)?;

    if let Some(email) = request.email.as_deref() {
        if let Some(owner) = get_user_by_email(pool, email).await? {
            if owner.id != id {
                return Err(BackendError::validation("email", EMAIL_TAKEN));
            }
        }
    }

    sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref())
    .bind(request.email.as_deref())
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_user_by_id(pool, id).await?.or_not_found("User", id)
}
