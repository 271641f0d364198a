//! Database operations for websites
//!
//! Deleting a website removes its pages, their sections and components
//! through the schema's cascades.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::backend::error::{BackendError, OrNotFound};
use crate::shared::models::website::{CreateWebsiteRequest, UpdateWebsiteRequest, Website};

const WEBSITE_COLUMNS: &str =
    "id, name, description, content, theme, status, seo_score, template_id, user_id, created_at, updated_at";

fn website_from_row(row: &SqliteRow) -> Result<Website, sqlx::Error> {
    let content: Json<serde_json::Value> = row.try_get("content")?;
    Ok(Website {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        content: content.0,
        theme: row.try_get("theme")?,
        status: row.try_get("status")?,
        seo_score: row.try_get("seo_score")?,
        template_id: row.try_get("template_id")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<Website>, BackendError> {
    let sql = format!("SELECT {} FROM websites WHERE id = ?", WEBSITE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    Ok(row.as_ref().map(website_from_row).transpose()?)
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Website, BackendError> {
    find(pool, id).await?.or_not_found("Website", id)
}

/// All websites, most recently updated first
pub async fn list(pool: &SqlitePool) -> Result<Vec<Website>, BackendError> {
    let sql = format!("SELECT {} FROM websites ORDER BY updated_at DESC", WEBSITE_COLUMNS);
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows.iter().map(website_from_row).collect::<Result<_, _>>()?)
}

/// A user's websites, most recently updated first
pub async fn list_by_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Website>, BackendError> {
    let sql = format!(
        "SELECT {} FROM websites WHERE user_id = ? ORDER BY updated_at DESC",
        WEBSITE_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.iter().map(website_from_row).collect::<Result<_, _>>()?)
}

/// Create a website
///
/// # Errors
/// `NotFound` if the owner or the referenced template does not exist
pub async fn create(pool: &SqlitePool, request: &CreateWebsiteRequest) -> Result<Website, BackendError> {
    let owner: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
        .bind(request.user_id)
        .fetch_optional(pool)
        .await?;
    owner.or_not_found("User", request.user_id)?;

    if let Some(template_id) = request.template_id {
        let template: Option<i64> = sqlx::query_scalar("SELECT 1 FROM templates WHERE id = ?")
            .bind(template_id)
            .fetch_optional(pool)
            .await?;
        template.or_not_found("Template", template_id)?;
    }

    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO websites (id, name, description, content, theme, status, seo_score, template_id, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(request.description.as_deref())
    .bind(Json(&request.content))
    .bind(request.theme.as_deref().unwrap_or("light"))
    .bind(request.status.as_deref().unwrap_or("draft"))
    .bind(request.seo_score)
    .bind(request.template_id)
    .bind(request.user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool, id).await
}

/// Update the given fields of a website
pub async fn update(pool: &SqlitePool, id: Uuid, request: &UpdateWebsiteRequest) -> Result<Website, BackendError> {
    let result = sqlx::query(
        r#"
        UPDATE websites
        SET name = COALESCE(?, name),
            description = CASE WHEN ? THEN ? ELSE description END,
            content = COALESCE(?, content),
            theme = COALESCE(?, theme),
            status = COALESCE(?, status),
            seo_score = CASE WHEN ? THEN ? ELSE seo_score END,
            template_id = COALESCE(?, template_id),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref())
    .bind(request.description.is_some())
    .bind(request.description.as_ref().and_then(Option::as_deref))
    .bind(request.content.as_ref().map(Json))
    .bind(request.theme.as_deref())
    .bind(request.status.as_deref())
    .bind(request.seo_score.is_some())
    .bind(request.seo_score.flatten())
    .bind(request.template_id)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Website", id));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), BackendError> {
    let result = sqlx::query("DELETE FROM websites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Website", id));
    }
    Ok(())
}
