//! Website HTTP Handlers
//!
//! - **`POST /api/websites`** - Create (201)
//! - **`GET /api/websites`** - All websites
//! - **`GET /api/websites/{id}`** - One website
//! - **`GET /api/users/{user_id}/websites`** - A user's websites
//! - **`PUT /api/websites/{id}`** - Partial update
//! - **`DELETE /api/websites/{id}`** - Delete with its pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::shared::models::website::{CreateWebsiteRequest, UpdateWebsiteRequest, Website};
use crate::shared::{ApiResponse, Deleted};

/// Create a website
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name, theme, status or SEO score
/// * `404 Not Found` - Unknown owner or template
pub async fn create_website(
    State(database): State<Database>,
    Json(request): Json<CreateWebsiteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Website>>), BackendError> {
    request.validate()?;

    let website = db::create(database.pool(), &request).await?;
    tracing::info!("Website created: {} for user {}", website.id, website.user_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(website))))
}

pub async fn get_website(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Website>>, BackendError> {
    let website = db::get(database.pool(), id).await?;
    Ok(Json(ApiResponse::ok(website)))
}

pub async fn get_websites(State(database): State<Database>) -> Result<Json<ApiResponse<Vec<Website>>>, BackendError> {
    let websites = db::list(database.pool()).await?;
    Ok(Json(ApiResponse::ok(websites)))
}

pub async fn get_user_websites(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Website>>>, BackendError> {
    let websites = db::list_by_user(database.pool(), user_id).await?;
    Ok(Json(ApiResponse::ok(websites)))
}

pub async fn update_website(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWebsiteRequest>,
) -> Result<Json<ApiResponse<Website>>, BackendError> {
    request.validate()?;

    let website = db::update(database.pool(), id, &request).await?;
    tracing::info!("Website updated: {}", website.id);

    Ok(Json(ApiResponse::ok(website)))
}

pub async fn delete_website(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, BackendError> {
    db::delete(database.pool(), id).await?;
    tracing::info!("Website deleted: {}", id);

    Ok(Json(ApiResponse::with_message("Website deleted", Deleted::new(id))))
}
