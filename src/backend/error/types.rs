/**
 * Backend Error Types
 *
 * This module defines the single error type returned by data-access code,
 * the ordering engine and HTTP handlers.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `NotFound` - The addressed row does not exist (404)
 * - `Validation` - A request field failed a check (400)
 * - `Unauthorized` - Missing/invalid token or bad credentials (401)
 * - `Conflict` - A transaction kept losing a lock race; nothing was written (409)
 *
 * ## Server Errors
 *
 * - `InvariantViolation` - Sibling positions were found non-dense after a write
 * - `Database`, `Token`, `Password`, `Serialization` - wrapped infrastructure failures
 *
 * Callers match on the variant, never on the message text.
 */

use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::SharedError;

/// SQLite result codes that mean "someone else holds the lock, try again"
///
/// SQLITE_BUSY (5), SQLITE_LOCKED (6) and their extended forms
/// BUSY_RECOVERY (261), LOCKED_SHAREDCACHE (262), BUSY_SNAPSHOT (517).
const RETRYABLE_SQLITE_CODES: &[&str] = &["5", "6", "261", "262", "517"];

/// Backend error taxonomy
///
/// # Usage
///
/// ```rust
/// use sitebuilder::backend::error::BackendError;
/// use uuid::Uuid;
///
/// let err = BackendError::not_found("Page", Uuid::nil());
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The addressed entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity label ("Page", "Section", ...)
        entity: &'static str,
        /// Identifier that was looked up (id, email, slug)
        id: String,
    },

    /// Request validation failure
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Authentication failure
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// A transaction could not acquire its locks within the retry budget
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Sibling positions in a scope are not exactly `0..N`
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Human-readable error message
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT encoding or decoding error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a not-found error
    ///
    /// # Arguments
    ///
    /// * `entity` - Entity label used in the message
    /// * `id` - The identifier that was looked up
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a validation error for one field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    /// Create an authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Whether the failed transaction may succeed if run again
    ///
    /// True for SQLite busy/locked errors (and `Conflict` itself).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Conflict { .. } => true,
            Self::Database(sqlx::Error::Database(db_err)) => db_err
                .code()
                .is_some_and(|code| RETRYABLE_SQLITE_CODES.contains(&code.as_ref())),
            _ => false,
        }
    }

    /// Whether this is a `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `Validation` - 400 Bad Request (500 for a serialization failure)
    /// - `Unauthorized`, `Token` - 401 Unauthorized
    /// - `Conflict` - 409 Conflict
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized { .. } | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvariantViolation { .. }
            | Self::Database(_)
            | Self::Password(_)
            | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Infrastructure failures are reported generically; their detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { .. } => self.to_string(),
            Self::Validation(SharedError::ValidationError { field, message }) => {
                format!("{}: {}", field, message)
            }
            Self::Validation(err) => err.to_string(),
            Self::Unauthorized { message } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::Token(_) => "Invalid or expired token".to_string(),
            Self::InvariantViolation { .. }
            | Self::Database(_)
            | Self::Password(_)
            | Self::Serialization(_) => "Internal server error".to_string(),
        }
    }
}

impl From<uuid::Error> for BackendError {
    fn from(err: uuid::Error) -> Self {
        Self::validation("id", format!("invalid UUID: {}", err))
    }
}

/// Map a missing row to `NotFound`
pub trait OrNotFound<T> {
    fn or_not_found(self, entity: &'static str, id: Uuid) -> Result<T, BackendError>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, entity: &'static str, id: Uuid) -> Result<T, BackendError> {
        self.ok_or_else(|| BackendError::not_found(entity, id))
    }
}
