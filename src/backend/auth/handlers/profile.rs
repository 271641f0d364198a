/**
 * Profile and Logout Handlers
 *
 * `GET /api/auth/profile` returns the user behind the bearer token; it sits
 * behind `require_auth`. `POST /api/auth/logout` only acknowledges: tokens
 * are stateless and the client discards its copy.
 */

use axum::{extract::State, Json};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::db::Database;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::middleware::AuthUser;
use crate::shared::models::user::User;
use crate::shared::ApiResponse;

/// Current user
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token (from the middleware)
/// * `404 Not Found` - The token is valid but the user no longer exists
pub async fn profile(
    State(database): State<Database>,
    AuthUser(auth): AuthUser,
) -> Result<Json<ApiResponse<User>>, BackendError> {
    let record = get_user_by_id(database.pool(), auth.user_id)
        .await?
        .or_not_found("User", auth.user_id)?;

    Ok(Json(ApiResponse::ok(User::from(record))))
}

pub async fn logout() -> Json<ApiResponse<Option<()>>> {
    Json(ApiResponse::with_message("Logout successful", None))
}
