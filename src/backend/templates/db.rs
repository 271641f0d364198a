//! Database operations for templates
//!
//! A template may own sections directly (see `SectionScope::Template`);
//! those are removed with it.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::{BackendError, OrNotFound};
use crate::shared::models::template::{CreateTemplateRequest, Template, TemplateFilters, UpdateTemplateRequest};

const TEMPLATE_COLUMNS: &str =
    "id, name, description, type, thumbnail, content, is_public, is_predefined, user_id, created_at, updated_at";

fn template_from_row(row: &SqliteRow) -> Result<Template, sqlx::Error> {
    let content: Json<serde_json::Value> = row.try_get("content")?;
    Ok(Template {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        template_type: row.try_get("type")?,
        thumbnail: row.try_get("thumbnail")?,
        content: content.0,
        is_public: row.try_get("is_public")?,
        is_predefined: row.try_get("is_predefined")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Template, BackendError> {
    let sql = format!("SELECT {} FROM templates WHERE id = ?", TEMPLATE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    row.as_ref()
        .map(template_from_row)
        .transpose()?
        .or_not_found("Template", id)
}

/// Templates matching every given filter, newest first
pub async fn list(pool: &SqlitePool, filters: &TemplateFilters) -> Result<Vec<Template>, BackendError> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM templates WHERE 1 = 1", TEMPLATE_COLUMNS));

    if let Some(is_public) = filters.is_public {
        query.push(" AND is_public = ").push_bind(is_public);
    }
    if let Some(is_predefined) = filters.is_predefined {
        query.push(" AND is_predefined = ").push_bind(is_predefined);
    }
    if let Some(template_type) = &filters.template_type {
        query.push(" AND type = ").push_bind(template_type.clone());
    }
    query.push(" ORDER BY created_at DESC");

    let rows = query.build().fetch_all(pool).await?;
    Ok(rows.iter().map(template_from_row).collect::<Result<_, _>>()?)
}

/// Templates created by a user, newest first
pub async fn list_by_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Template>, BackendError> {
    let sql = format!(
        "SELECT {} FROM templates WHERE user_id = ? ORDER BY created_at DESC",
        TEMPLATE_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.iter().map(template_from_row).collect::<Result<_, _>>()?)
}

pub async fn create(pool: &SqlitePool, request: &CreateTemplateRequest) -> Result<Template, BackendError> {
    if let Some(user_id) = request.user_id {
        let owner: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        owner.or_not_found("User", user_id)?;
    }

    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO templates (id, name, description, type, thumbnail, content, is_public, is_predefined, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(request.description.as_deref())
    .bind(&request.template_type)
    .bind(request.thumbnail.as_deref())
    .bind(Json(&request.content))
    .bind(request.is_public.unwrap_or(false))
    .bind(request.is_predefined.unwrap_or(false))
    .bind(request.user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: Uuid, request: &UpdateTemplateRequest) -> Result<Template, BackendError> {
    let result = sqlx::query(
        r#"
        UPDATE templates
        SET name = COALESCE(?, name),
            description = CASE WHEN ? THEN ? ELSE description END,
            type = COALESCE(?, type),
            thumbnail = CASE WHEN ? THEN ? ELSE thumbnail END,
            content = COALESCE(?, content),
            is_public = COALESCE(?, is_public),
            is_predefined = COALESCE(?, is_predefined),
            user_id = COALESCE(?, user_id),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref())
    .bind(request.description.is_some())
    .bind(request.description.as_ref().and_then(Option::as_deref))
    .bind(request.template_type.as_deref())
    .bind(request.thumbnail.is_some())
    .bind(request.thumbnail.as_ref().and_then(Option::as_deref))
    .bind(request.content.as_ref().map(Json))
    .bind(request.is_public)
    .bind(request.is_predefined)
    .bind(request.user_id)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Template", id));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), BackendError> {
    let result = sqlx::query("DELETE FROM templates WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Template", id));
    }
    Ok(())
}
