//! Component HTTP Handlers
//!
//! - **`POST /api/components`** - Create (append, or insert at `order`)
//! - **`GET /api/components/{id}`** - Get one component
//! - **`GET /api/components/section/{section_id}`** - Components of a section, in order
//! - **`PUT /api/components/{id}`** - Partial update
//! - **`PATCH /api/components/reorder`** - Move within the section
//! - **`DELETE /api/components/{id}`** - Delete and close the gap
//! - **`POST /api/components/{id}/duplicate`** - Copy right after the original
//! - **`PATCH /api/components/move`** - Move to another section

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::db::{self, ComponentKind, ComponentScope};
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::backend::ordering::SiblingStore;
use crate::shared::models::component::{
    Component, CreateComponentRequest, MoveComponentRequest, UpdateComponentRequest,
};
use crate::shared::models::ReorderRequest;
use crate::shared::{ApiResponse, Deleted};

/// Create a component
///
/// # Errors
///
/// * `400 Bad Request` - Negative `order`
/// * `404 Not Found` - The section does not exist
pub async fn create_component(
    State(database): State<Database>,
    Json(request): Json<CreateComponentRequest>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    request.validate()?;

    let component = db::create(&database, request).await?;
    tracing::info!(
        "Component created: {} ({}) at {} in section {}",
        component.id,
        component.component_type,
        component.order,
        component.section_id
    );

    Ok(Json(ApiResponse::ok(component)))
}

pub async fn get_component(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    let component = db::get(database.pool(), id).await?;
    Ok(Json(ApiResponse::ok(component)))
}

pub async fn get_section_components(
    State(database): State<Database>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Component>>>, BackendError> {
    let components = db::list_by_section(database.pool(), section_id).await?;
    Ok(Json(ApiResponse::ok(components)))
}

pub async fn update_component(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateComponentRequest>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    request.validate()?;

    let component = db::update(&database, id, request).await?;
    tracing::info!("Component updated: {}", component.id);

    Ok(Json(ApiResponse::ok(component)))
}

pub async fn reorder_component(
    State(store): State<SiblingStore<ComponentKind>>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    request.validate()?;

    let component = store.reorder_and_fetch(request.id, request.new_order).await?;

    Ok(Json(ApiResponse::ok(component)))
}

pub async fn delete_component(
    State(store): State<SiblingStore<ComponentKind>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, BackendError> {
    store.delete(id).await?;
    Ok(Json(ApiResponse::with_message("Component deleted", Deleted::new(id))))
}

/// Duplicate a component into the position right after it
pub async fn duplicate_component(
    State(store): State<SiblingStore<ComponentKind>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    let component = store.duplicate_and_fetch(id).await?;

    Ok(Json(ApiResponse::ok(component)))
}

/// Move a component to another section (or within its own)
///
/// # Errors
///
/// * `404 Not Found` - The component or the target section does not exist
pub async fn move_component(
    State(store): State<SiblingStore<ComponentKind>>,
    Json(request): Json<MoveComponentRequest>,
) -> Result<Json<ApiResponse<Component>>, BackendError> {
    request.validate()?;

    let component = store
        .move_and_fetch(request.id, ComponentScope(request.target_section_id), request.new_order)
        .await?;

    Ok(Json(ApiResponse::ok(component)))
}
