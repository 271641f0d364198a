//! Page HTTP Handlers
//!
//! - **`POST /api/pages`** - Create (append, or insert at `order`)
//! - **`GET /api/pages/{id}`** - One page with sections and components
//! - **`GET /api/pages/website/{website_id}`** - Pages of a website, in order
//! - **`GET /api/pages/website/{website_id}/slug/{slug}`** - Page by slug
//! - **`GET /api/pages/website/{website_id}/home`** - The home page
//! - **`PUT /api/pages/{id}`** - Partial update
//! - **`PATCH /api/pages/reorder`** - Move within the website
//! - **`DELETE /api/pages/{id}`** - Delete and close the gap

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::db::{self, PageKind};
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::backend::ordering::SiblingStore;
use crate::shared::models::page::{CreatePageRequest, PageDetail, UpdatePageRequest};
use crate::shared::models::ReorderRequest;
use crate::shared::{ApiResponse, Deleted};

/// Create a page
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name, slug or order, or slug already used
/// * `404 Not Found` - The website does not exist
pub async fn create_page(
    State(database): State<Database>,
    Json(request): Json<CreatePageRequest>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    request.validate()?;

    let detail = db::create(&database, request).await?;
    let page = &detail.page;
    tracing::info!(
        "Page created: {} '{}' at {} in website {}",
        page.id,
        page.slug,
        page.order,
        page.website_id
    );

    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_page(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    let mut conn = database.pool().acquire().await?;
    let detail = db::get_detail(&mut conn, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_page_by_slug(
    State(database): State<Database>,
    Path((website_id, slug)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    let detail = db::get_by_slug(database.pool(), website_id, &slug).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_website_pages(
    State(database): State<Database>,
    Path(website_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PageDetail>>>, BackendError> {
    let pages = db::list_by_website(database.pool(), website_id).await?;
    Ok(Json(ApiResponse::ok(pages)))
}

pub async fn get_home_page(
    State(database): State<Database>,
    Path(website_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    let detail = db::get_home(database.pool(), website_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn update_page(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    request.validate()?;

    let detail = db::update(&database, id, request).await?;
    tracing::info!("Page updated: {} '{}'", detail.page.id, detail.page.slug);

    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn reorder_page(
    State(store): State<SiblingStore<PageKind>>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<PageDetail>>, BackendError> {
    request.validate()?;

    let detail = store.reorder_and_fetch(request.id, request.new_order).await?;

    Ok(Json(ApiResponse::ok(detail)))
}

/// Delete a page
///
/// # Errors
///
/// * `400 Bad Request` - The page is the website's only page and its home page
/// * `404 Not Found` - No such page
pub async fn delete_page(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, BackendError> {
    db::delete(&database, id).await?;
    Ok(Json(ApiResponse::with_message("Page deleted", Deleted::new(id))))
}
