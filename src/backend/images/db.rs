//! Database operations for image metadata
//!
//! Only the bookkeeping rows live here. Deletes hand back the stored URLs so
//! the caller can remove the files from wherever they are hosted.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::{BackendError, OrNotFound};
use crate::shared::models::image::{
    CreateImageRequest, DeletedImage, DeletedImages, Image, ImagePage, ImageStats, Pagination,
    UpdateImageRequest,
};

const IMAGE_COLUMNS: &str = "id, filename, url, size, mime_type, alt, user_id, created_at, updated_at";

/// SQLite reads a negative LIMIT as "no limit"
fn limit_of(pagination: Pagination) -> (i64, i64) {
    (pagination.limit.unwrap_or(-1), pagination.offset.unwrap_or(0))
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern
fn like_escape(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Image, BackendError> {
    let sql = format!("SELECT {} FROM images WHERE id = ?", IMAGE_COLUMNS);
    sqlx::query_as::<_, Image>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .or_not_found("Image", id)
}

/// One page of images, newest first, optionally restricted to one user
pub async fn list(pool: &SqlitePool, user_id: Option<Uuid>, pagination: Pagination) -> Result<ImagePage, BackendError> {
    let (limit, offset) = limit_of(pagination);

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!("SELECT {} FROM images", IMAGE_COLUMNS));
    let mut count: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM images");
    if let Some(user_id) = user_id {
        query.push(" WHERE user_id = ").push_bind(user_id);
        count.push(" WHERE user_id = ").push_bind(user_id);
    }
    query
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let images = query.build_query_as::<Image>().fetch_all(pool).await?;
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    Ok(ImagePage { images, total })
}

/// A user's images whose filename contains `term`, ignoring ASCII case
pub async fn search(pool: &SqlitePool, user_id: Uuid, term: &str) -> Result<Vec<Image>, BackendError> {
    let sql = format!(
        "SELECT {} FROM images WHERE user_id = ? AND filename LIKE ? ESCAPE '\\' ORDER BY created_at DESC",
        IMAGE_COLUMNS
    );
    let images = sqlx::query_as::<_, Image>(&sql)
        .bind(user_id)
        .bind(format!("%{}%", like_escape(term)))
        .fetch_all(pool)
        .await?;
    Ok(images)
}

/// A user's images whose MIME type starts with `prefix` (`image/` matches all)
pub async fn list_by_mime_type(pool: &SqlitePool, user_id: Uuid, prefix: &str) -> Result<Vec<Image>, BackendError> {
    let sql = format!(
        "SELECT {} FROM images WHERE user_id = ? AND substr(mime_type, 1, length(?)) = ? ORDER BY created_at DESC",
        IMAGE_COLUMNS
    );
    let images = sqlx::query_as::<_, Image>(&sql)
        .bind(user_id)
        .bind(prefix)
        .bind(prefix)
        .fetch_all(pool)
        .await?;
    Ok(images)
}

pub async fn stats(pool: &SqlitePool, user_id: Uuid) -> Result<ImageStats, BackendError> {
    let (total_images, total_size): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(size), 0) FROM images WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(ImageStats::new(total_images, total_size))
}

pub async fn create(pool: &SqlitePool, request: &CreateImageRequest) -> Result<Image, BackendError> {
    let owner: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
        .bind(request.user_id)
        .fetch_optional(pool)
        .await?;
    owner.or_not_found("User", request.user_id)?;

    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO images (id, filename, url, size, mime_type, alt, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&request.filename)
    .bind(&request.url)
    .bind(request.size)
    .bind(&request.mime_type)
    .bind(request.alt.as_deref())
    .bind(request.user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: Uuid, request: &UpdateImageRequest) -> Result<Image, BackendError> {
    let result = sqlx::query(
        r#"
        UPDATE images
        SET filename = COALESCE(?, filename),
            url = COALESCE(?, url),
            alt = CASE WHEN ? THEN ? ELSE alt END,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(request.filename.as_deref())
    .bind(request.url.as_deref())
    .bind(request.alt.is_some())
    .bind(request.alt.as_ref().and_then(Option::as_deref))
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Image", id));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<DeletedImage, BackendError> {
    let url: String = sqlx::query_scalar("DELETE FROM images WHERE id = ? RETURNING url")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .or_not_found("Image", id)?;

    Ok(DeletedImage { id, deleted: true, url })
}

/// Delete those of `ids` that belong to `user_id`
///
/// # Errors
/// `NotFound` when none of the ids is an image of that user
pub async fn delete_many(pool: &SqlitePool, user_id: Uuid, ids: &[Uuid]) -> Result<DeletedImages, BackendError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM images WHERE user_id = ");
    query.push_bind(user_id).push(" AND id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") RETURNING url");

    let urls: Vec<String> = query.build_query_scalar().fetch_all(pool).await?;
    if urls.is_empty() {
        return Err(BackendError::not_found(
            "Image",
            format!("none of {} id(s) belong to user {}", ids.len(), user_id),
        ));
    }

    Ok(DeletedImages {
        deleted: urls.len() as u64,
        urls,
    })
}
