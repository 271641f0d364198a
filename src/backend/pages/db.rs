//! Database operations for pages
//!
//! Pages are ordered within their website. Besides position, a page carries
//! two website-wide constraints: its slug is unique within the website, and
//! at most one page is the home page. Both are enforced in the same
//! transaction as the ordering change.

use chrono::Utc;
use futures_util::future::BoxFuture;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::backend::db::Database;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::ordering::{ops, ParentScope, Placement, SiblingKind, SiblingRecord};
use crate::backend::sections::db::{self as sections, SectionScope};
use crate::shared::models::page::{CreatePageRequest, Page, PageDetail, UpdatePageRequest};

/// Pages of one website
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageScope(pub Uuid);

impl ParentScope for PageScope {
    fn column(&self) -> &'static str {
        "website_id"
    }

    fn key(&self) -> Uuid {
        self.0
    }

    fn parent_table(&self) -> &'static str {
        "websites"
    }

    fn parent_label(&self) -> &'static str {
        "Website"
    }
}

/// The `pages` table as an ordered sibling list
pub struct PageKind;

impl SiblingKind for PageKind {
    type Scope = PageScope;

    const TABLE: &'static str = "pages";
    const LABEL: &'static str = "Page";
    const PARENT_COLUMNS: &'static [&'static str] = &["website_id"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &["name", "slug", "is_home"];

    fn scope_from_row(row: &SqliteRow) -> Result<PageScope, sqlx::Error> {
        Ok(PageScope(row.try_get("website_id")?))
    }
}

impl SiblingRecord for PageKind {
    type Record = PageDetail;

    fn fetch<'c>(conn: &'c mut SqliteConnection, id: Uuid) -> BoxFuture<'c, Result<PageDetail, BackendError>> {
        Box::pin(get_detail(conn, id))
    }
}

const PAGE_COLUMNS: &str = "id, name, slug, is_home, position, website_id, created_at, updated_at";

const SLUG_TAKEN: &str = "A page with this slug already exists in this website";

fn page_from_row(row: &SqliteRow) -> Result<Page, sqlx::Error> {
    Ok(Page {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        is_home: row.try_get("is_home")?,
        order: row.try_get("position")?,
        website_id: row.try_get("website_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<Page>, BackendError> {
    let sql = format!("SELECT {} FROM pages WHERE id = ?", PAGE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    Ok(row.as_ref().map(page_from_row).transpose()?)
}

async fn with_sections(conn: &mut SqliteConnection, page: Page) -> Result<PageDetail, BackendError> {
    let sections = sections::list_details(conn, SectionScope::Page(page.id)).await?;
    Ok(PageDetail { page, sections })
}

/// Get a page with its sections and components
pub async fn get_detail(conn: &mut SqliteConnection, id: Uuid) -> Result<PageDetail, BackendError> {
    let page = find(&mut *conn, id).await?.or_not_found("Page", id)?;
    with_sections(conn, page).await
}

/// Get a page by its slug within a website
pub async fn get_by_slug(pool: &SqlitePool, website_id: Uuid, slug: &str) -> Result<PageDetail, BackendError> {
    let sql = format!("SELECT {} FROM pages WHERE website_id = ? AND slug = ?", PAGE_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(website_id)
        .bind(slug)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| BackendError::not_found("Page", slug))?;

    let mut conn = pool.acquire().await?;
    with_sections(&mut conn, page_from_row(&row)?).await
}

/// The website's home page
///
/// # Errors
/// `NotFound` when no page of the website is flagged as home
pub async fn get_home(pool: &SqlitePool, website_id: Uuid) -> Result<PageDetail, BackendError> {
    let sql = format!("SELECT {} FROM pages WHERE website_id = ? AND is_home = 1", PAGE_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(website_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| BackendError::not_found("Home page", website_id))?;

    let mut conn = pool.acquire().await?;
    with_sections(&mut conn, page_from_row(&row)?).await
}

/// Pages of a website in position order, each with its sections
pub async fn list_by_website(pool: &SqlitePool, website_id: Uuid) -> Result<Vec<PageDetail>, BackendError> {
    let sql = format!(
        "SELECT {} FROM pages WHERE website_id = ? ORDER BY position",
        PAGE_COLUMNS
    );
    let mut conn = pool.acquire().await?;
    let rows = sqlx::query(&sql).bind(website_id).fetch_all(&mut *conn).await?;

    let mut pages = Vec::with_capacity(rows.len());
    for row in &rows {
        pages.push(with_sections(&mut conn, page_from_row(row)?).await?);
    }
    Ok(pages)
}

async fn slug_taken(
    conn: &mut SqliteConnection,
    website_id: Uuid,
    slug: &str,
    except: Option<Uuid>,
) -> Result<bool, BackendError> {
    let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM pages WHERE website_id = ? AND slug = ?")
        .bind(website_id)
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(matches!(taken, Some(id) if Some(id) != except))
}

/// Clear the home flag on every page of the website except `keep`
async fn clear_home(conn: &mut SqliteConnection, website_id: Uuid, keep: Option<Uuid>) -> Result<(), BackendError> {
    sqlx::query("UPDATE pages SET is_home = 0, updated_at = ? WHERE website_id = ? AND is_home = 1 AND id IS NOT ?")
        .bind(Utc::now())
        .bind(website_id)
        .bind(keep)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Create a page, appended or inserted at `request.order`
///
/// # Errors
/// * `NotFound` - The website does not exist
/// * `Validation` - The slug is already used in this website
pub async fn create(db: &Database, request: CreatePageRequest) -> Result<PageDetail, BackendError> {
    db.transaction("create page", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let scope = PageScope(request.website_id);
            ops::require_parent(conn, scope).await?;

            if slug_taken(conn, request.website_id, &request.slug, None).await? {
                return Err(BackendError::validation("slug", SLUG_TAKEN));
            }

            let is_home = request.is_home.unwrap_or(false);
            if is_home {
                clear_home(conn, request.website_id, None).await?;
            }

            let position = ops::reserve_slot::<PageKind>(conn, scope, request.order).await?;

            let id = Uuid::new_v4();
            let now = Utc::now();
            sqlx::query(
                r#"
                INSERT INTO pages (id, name, slug, is_home, position, website_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(&request.name)
            .bind(&request.slug)
            .bind(is_home)
            .bind(position)
            .bind(request.website_id)
            .bind(now)
            .bind(now)
            .execute(&mut *conn)
            .await?;

            get_detail(conn, id).await
        })
    })
    .await
}

/// Update a page
///
/// Slug uniqueness, home exclusivity, the reorder and the field update all
/// happen in one transaction.
pub async fn update(db: &Database, id: Uuid, request: UpdatePageRequest) -> Result<PageDetail, BackendError> {
    db.transaction("update page", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let page = find(&mut *conn, id).await?.or_not_found("Page", id)?;

            if let Some(slug) = request.slug.as_deref() {
                if slug != page.slug && slug_taken(conn, page.website_id, slug, Some(id)).await? {
                    return Err(BackendError::validation("slug", SLUG_TAKEN));
                }
            }

            if request.is_home == Some(true) {
                clear_home(conn, page.website_id, Some(id)).await?;
            }

            if let Some(order) = request.order {
                ops::reorder_in::<PageKind>(conn, id, order).await?;
                ops::verify_density::<PageKind>(conn, PageScope(page.website_id)).await?;
            }

            sqlx::query(
                r#"
                UPDATE pages
                SET name = COALESCE(?, name),
                    slug = COALESCE(?, slug),
                    is_home = COALESCE(?, is_home),
                    updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(request.name.as_deref())
            .bind(request.slug.as_deref())
            .bind(request.is_home)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;

            get_detail(conn, id).await
        })
    })
    .await
}

/// Delete a page and close the gap among its siblings
///
/// Deleting the home page hands the flag to the lowest-ordered remaining
/// page.
///
/// # Errors
/// * `NotFound` - No such page
/// * `Validation` - The page is its website's only page and the home page
pub async fn delete(db: &Database, id: Uuid) -> Result<Placement<PageScope>, BackendError> {
    let removed = db
        .transaction("delete page", move |conn| {
            Box::pin(async move {
                let page = find(&mut *conn, id).await?.or_not_found("Page", id)?;
                let scope = PageScope(page.website_id);

                if page.is_home {
                    if ops::count::<PageKind>(conn, scope).await? <= 1 {
                        return Err(BackendError::validation(
                            "id",
                            "Cannot delete the only home page of a website",
                        ));
                    }

                    sqlx::query(
                        r#"
                        UPDATE pages SET is_home = 1, updated_at = ?
                        WHERE id = (
                            SELECT id FROM pages
                            WHERE website_id = ? AND id != ?
                            ORDER BY position
                            LIMIT 1
                        )
                        "#,
                    )
                    .bind(Utc::now())
                    .bind(page.website_id)
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                }

                let removed = ops::remove_in::<PageKind>(conn, id).await?;
                ops::verify_density::<PageKind>(conn, removed.scope).await?;
                Ok(removed)
            })
        })
        .await?;

    tracing::info!("Deleted Page {}", removed);
    Ok(removed)
}
