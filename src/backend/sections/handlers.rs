//! Section HTTP Handlers
//!
//! - **`POST /api/sections`** - Create under a page or a template
//! - **`GET /api/sections/{id}`** - One section with its components
//! - **`GET /api/sections/page/{page_id}`** - Sections of a page, in order
//! - **`GET /api/sections/template/{template_id}`** - Sections of a template, in order
//! - **`PUT /api/sections/{id}`** - Partial update
//! - **`PATCH /api/sections/reorder`** - Move within the parent
//! - **`PATCH /api/sections/move`** - Move to another page or template
//! - **`DELETE /api/sections/{id}`** - Delete (components cascade)

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::db::{self, SectionKind, SectionScope};
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::backend::ordering::SiblingStore;
use crate::shared::models::section::{
    CreateSectionRequest, MoveSectionRequest, SectionDetail, UpdateSectionRequest,
};
use crate::shared::models::ReorderRequest;
use crate::shared::{ApiResponse, Deleted};

/// Create a section
///
/// # Errors
///
/// * `400 Bad Request` - Neither or both of `pageId` / `templateId`, bad name or order
/// * `404 Not Found` - The page or template does not exist
pub async fn create_section(
    State(database): State<Database>,
    Json(request): Json<CreateSectionRequest>,
) -> Result<Json<ApiResponse<SectionDetail>>, BackendError> {
    let parent = request.validate()?;

    let detail = db::create(&database, parent, request).await?;
    tracing::info!(
        "Section created: {} at {} under {:?}",
        detail.section.id,
        detail.section.order,
        parent
    );

    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_section(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SectionDetail>>, BackendError> {
    let mut conn = database.pool().acquire().await?;
    let detail = db::get_detail(&mut conn, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_page_sections(
    State(database): State<Database>,
    Path(page_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SectionDetail>>>, BackendError> {
    let mut conn = database.pool().acquire().await?;
    let sections = db::list_details(&mut conn, SectionScope::Page(page_id)).await?;
    Ok(Json(ApiResponse::ok(sections)))
}

pub async fn get_template_sections(
    State(database): State<Database>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SectionDetail>>>, BackendError> {
    let mut conn = database.pool().acquire().await?;
    let sections = db::list_details(&mut conn, SectionScope::Template(template_id)).await?;
    Ok(Json(ApiResponse::ok(sections)))
}

pub async fn update_section(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSectionRequest>,
) -> Result<Json<ApiResponse<SectionDetail>>, BackendError> {
    request.validate()?;

    let detail = db::update(&database, id, request).await?;
    tracing::info!("Section updated: {}", detail.section.id);

    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn reorder_section(
    State(store): State<SiblingStore<SectionKind>>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<SectionDetail>>, BackendError> {
    request.validate()?;

    let detail = store.reorder_and_fetch(request.id, request.new_order).await?;

    Ok(Json(ApiResponse::ok(detail)))
}

/// Move a section to another page or template
///
/// # Errors
///
/// * `400 Bad Request` - Neither or both of `targetPageId` / `targetTemplateId`
/// * `404 Not Found` - The section or the target parent does not exist
pub async fn move_section(
    State(store): State<SiblingStore<SectionKind>>,
    Json(request): Json<MoveSectionRequest>,
) -> Result<Json<ApiResponse<SectionDetail>>, BackendError> {
    let target = request.validate()?;

    let detail = store
        .move_and_fetch(request.id, SectionScope::from(target), request.new_order)
        .await?;

    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn delete_section(
    State(store): State<SiblingStore<SectionKind>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, BackendError> {
    store.delete(id).await?;
    Ok(Json(ApiResponse::with_message("Section deleted", Deleted::new(id))))
}
