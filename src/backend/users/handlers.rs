//! User HTTP Handlers
//!
//! - **`GET /api/users/{id}`** - User by ID
//! - **`GET /api/users/email/{email}`** - User by email
//! - **`PUT /api/users/{id}`** - Update name and/or email

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_email, get_user_by_id, update_user};
use crate::backend::db::Database;
use crate::backend::error::{BackendError, OrNotFound};
use crate::shared::models::user::{UpdateUserRequest, User};
use crate::shared::ApiResponse;

pub async fn get_user(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, BackendError> {
    let record = get_user_by_id(database.pool(), id).await?.or_not_found("User", id)?;
    Ok(Json(ApiResponse::ok(User::from(record))))
}

pub async fn get_user_by_email_address(
    State(database): State<Database>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<User>>, BackendError> {
    let record = get_user_by_email(database.pool(), &email)
        .await?
        .ok_or_else(|| BackendError::not_found("User", &email))?;
    Ok(Json(ApiResponse::ok(User::from(record))))
}

/// Update a user
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name or email, or email used by another user
/// * `404 Not Found` - No such user
pub async fn update_user_profile(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, BackendError> {
    request.validate()?;

    let record = update_user(database.pool(), id, &request).await?;
    tracing::info!("User updated: {}", record.id);

    Ok(Json(ApiResponse::ok(User::from(record))))
}
