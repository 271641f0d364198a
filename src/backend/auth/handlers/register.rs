/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email format and password strength
 * 2. Hash password using bcrypt
 * 3. Create user in database (email must be unused)
 * 4. Generate JWT token
 * 5. Return user and token
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::create_user;
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::shared::models::user::{AuthPayload, RegisterRequest, User};
use crate::shared::ApiResponse;

/// Register handler
///
/// # Returns
///
/// `201 Created` with `{ user, token }`
///
/// # Errors
///
/// * `400 Bad Request` - Invalid email, weak password, or email already registered
/// * `500 Internal Server Error` - Hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "Sup3rsecret",
///   "name": "Ana"
/// }
/// ```
pub async fn register(
    State(database): State<Database>,
    State(tokens): State<TokenIssuer>,
    State(passwords): State<PasswordHasher>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), BackendError> {
    tracing::info!("Register request for: {}", request.email);

    request.validate()?;

    let password_hash = passwords.hash(&request.password)?;
    let record = create_user(database.pool(), &request.email, &password_hash, request.name.as_deref()).await?;
    let user = User::from(record);

    let token = tokens.issue(&user)?;
    tracing::info!("User registered successfully: {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Registration successful",
            AuthPayload { user, token },
        )),
    ))
}
