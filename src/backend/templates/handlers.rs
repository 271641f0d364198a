//! Template HTTP Handlers
//!
//! - **`POST /api/templates`** - Create (201)
//! - **`GET /api/templates`** - List, filtered by `isPublic`, `isPredefined`, `type`
//! - **`GET /api/templates/public/all`** - Public templates
//! - **`GET /api/templates/type/{template_type}`** - Templates of one type
//! - **`GET /api/templates/{id}`** - One template
//! - **`GET /api/users/{user_id}/templates`** - A user's templates
//! - **`PUT /api/templates/{id}`** - Partial update
//! - **`DELETE /api/templates/{id}`** - Delete with its sections

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::shared::models::template::{CreateTemplateRequest, Template, TemplateFilters, UpdateTemplateRequest};
use crate::shared::{ApiResponse, Deleted};

pub async fn create_template(
    State(database): State<Database>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Template>>), BackendError> {
    request.validate()?;

    let template = db::create(database.pool(), &request).await?;
    tracing::info!("Template created: {} ({})", template.id, template.template_type);

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(template))))
}

pub async fn get_template(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Template>>, BackendError> {
    let template = db::get(database.pool(), id).await?;
    Ok(Json(ApiResponse::ok(template)))
}

pub async fn get_templates(
    State(database): State<Database>,
    Query(filters): Query<TemplateFilters>,
) -> Result<Json<ApiResponse<Vec<Template>>>, BackendError> {
    let templates = db::list(database.pool(), &filters).await?;
    Ok(Json(ApiResponse::ok(templates)))
}

pub async fn get_public_templates(
    State(database): State<Database>,
) -> Result<Json<ApiResponse<Vec<Template>>>, BackendError> {
    let filters = TemplateFilters {
        is_public: Some(true),
        ..Default::default()
    };
    let templates = db::list(database.pool(), &filters).await?;
    Ok(Json(ApiResponse::ok(templates)))
}

pub async fn get_templates_by_type(
    State(database): State<Database>,
    Path(template_type): Path<String>,
) -> Result<Json<ApiResponse<Vec<Template>>>, BackendError> {
    let filters = TemplateFilters {
        template_type: Some(template_type),
        ..Default::default()
    };
    let templates = db::list(database.pool(), &filters).await?;
    Ok(Json(ApiResponse::ok(templates)))
}

pub async fn get_user_templates(
    State(database): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Template>>>, BackendError> {
    let templates = db::list_by_user(database.pool(), user_id).await?;
    Ok(Json(ApiResponse::ok(templates)))
}

pub async fn update_template(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<ApiResponse<Template>>, BackendError> {
    request.validate()?;

    let template = db::update(database.pool(), id, &request).await?;
    tracing::info!("Template updated: {}", template.id);

    Ok(Json(ApiResponse::ok(template)))
}

pub async fn delete_template(
    State(database): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, BackendError> {
    db::delete(database.pool(), id).await?;
    tracing::info!("Template deleted: {}", id);

    Ok(Json(ApiResponse::with_message("Template deleted", Deleted::new(id))))
}
