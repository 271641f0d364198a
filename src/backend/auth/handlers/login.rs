/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return user and token
 *
 * # Security
 *
 * - Unknown email, wrong password and password-less accounts all get the
 *   same 401 message
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, Json};

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::shared::models::user::{AuthPayload, LoginRequest, User};
use crate::shared::ApiResponse;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Malformed email or empty password
/// * `401 Unauthorized` - Credentials do not match an account
/// * `500 Internal Server Error` - Database or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "data": {
///     "user": { "id": "…", "email": "user@example.com", "provider": "email", "isVerified": false },
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
///   }
/// }
/// ```
pub async fn login(
    State(database): State<Database>,
    State(tokens): State<TokenIssuer>,
    State(passwords): State<PasswordHasher>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    request.validate()?;

    let record = get_user_by_email(database.pool(), &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let Some(password_hash) = record.password_hash.as_deref() else {
        tracing::warn!("Account without password: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !passwords.verify(&request.password, password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let user = User::from(record);
    let token = tokens.issue(&user)?;
    tracing::info!("User logged in successfully: {} ({})", user.id, user.email);

    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthPayload { user, token },
    )))
}
