//! Image HTTP Handlers
//!
//! - **`POST /api/images`** - Record an uploaded image
//! - **`GET /api/images?limit=&offset=`** - All images, paged
//! - **`GET /api/images/{id}`** - One image
//! - **`GET /api/images/user/{user_id}?limit=&offset=`** - A user's images, paged
//! - **`GET /api/images/user/{user_id}/search?search=`** - Filename search
//! - **`GET /api/images/user/{user_id}/mime?mimeType=`** - MIME prefix filter
//! - **`GET /api/images/user/{user_id}/stats`** - Count and sizes
//! - **`PUT /api/images/{id}`** - Partial update
//! - **`DELETE /api/images/{id}`** - Delete, returning the URL
//! - **`POST /api/images/delete-many`** - Bulk delete a user's images

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::shared::models::image::{
    CreateImageRequest, DeleteManyImagesRequest, DeletedImage, DeletedImages, Image, ImagePage, ImageStats,
    MimeTypeQuery, Pagination, SearchQuery, UpdateImageRequest,
};
use crate::shared::ApiResponse;

pub async fn create_image(
    State(database): State<Database>,
    Json(request): Json<CreateImageRequest>,
) -> Result<Json<ApiResponse<Image>>, BackendError> {
    request.validate()?;

    let image = db::create(database.pool(), &request).await?;
    tracing::info!("Image recorded: {} ({} bytes) for user {}", image.id, image.size, image.user_id);

    Ok(Json(ApiResponse::ok(image)))
}

pub async fn get_image(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Image>>, BackendError> {
    let image = db::get(database.pool(), id).await?;
    Ok(Json(ApiResponse::ok(image)))
}

pub async fn get_images(
    State(database): State<Database>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<ImagePage>>, BackendError> {
    pagination.validate()?;

    let page = db::list(database.pool(), None, pagination).await?;
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn get_user_images(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<ImagePage>>, BackendError> {
    pagination.validate()?;

    let page = db::list(database.pool(), Some(user_id), pagination).await?;
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn search_images(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Image>>>, BackendError> {
    let images = db::search(database.pool(), user_id, &query.search).await?;
    Ok(Json(ApiResponse::ok(images)))
}

pub async fn get_images_by_mime_type(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<MimeTypeQuery>,
) -> Result<Json<ApiResponse<Vec<Image>>>, BackendError> {
    let images = db::list_by_mime_type(database.pool(), user_id, &query.mime_type).await?;
    Ok(Json(ApiResponse::ok(images)))
}

pub async fn get_image_stats(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ImageStats>>, BackendError> {
    let stats = db::stats(database.pool(), user_id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn update_image(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateImageRequest>,
) -> Result<Json<ApiResponse<Image>>, BackendError> {
    request.validate()?;

    let image = db::update(database.pool(), id, &request).await?;
    Ok(Json(ApiResponse::ok(image)))
}

pub async fn delete_image(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedImage>>, BackendError> {
    let deleted = db::delete(database.pool(), id).await?;
    tracing::info!("Image deleted: {}", id);

    Ok(Json(ApiResponse::with_message("Image deleted", deleted)))
}

/// Delete several images of one user
///
/// Ids that do not exist or belong to someone else are skipped.
///
/// # Errors
///
/// * `400 Bad Request` - Empty list or more than 100 ids
/// * `404 Not Found` - None of the ids matched
pub async fn delete_many_images(
    State(database): State<Database>,
    Json(request): Json<DeleteManyImagesRequest>,
) -> Result<Json<ApiResponse<DeletedImages>>, BackendError> {
    request.validate()?;

    let deleted = db::delete_many(database.pool(), request.user_id, &request.ids).await?;
    tracing::info!("Deleted {} image(s) of user {}", deleted.deleted, request.user_id);

    let message = format!("{} image(s) deleted", deleted.deleted);
    Ok(Json(ApiResponse::with_message(message, deleted)))
}
