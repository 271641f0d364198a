//! Database operations for components
//!
//! Components are ordered within their section. Position changes go through
//! the ordering engine; this module adds the row-level reads and writes.

use chrono::Utc;
use futures_util::future::BoxFuture;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::backend::db::Database;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::ordering::{ops, ParentScope, SiblingKind, SiblingRecord};
use crate::shared::models::component::{
    Component, ComponentType, CreateComponentRequest, UpdateComponentRequest,
};

/// Components of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentScope(pub Uuid);

impl ParentScope for ComponentScope {
    fn column(&self) -> &'static str {
        "section_id"
    }

    fn key(&self) -> Uuid {
        self.0
    }

    fn parent_table(&self) -> &'static str {
        "sections"
    }

    fn parent_label(&self) -> &'static str {
        "Section"
    }
}

/// The `components` table as an ordered sibling list
pub struct ComponentKind;

impl SiblingKind for ComponentKind {
    type Scope = ComponentScope;

    const TABLE: &'static str = "components";
    const LABEL: &'static str = "Component";
    const PARENT_COLUMNS: &'static [&'static str] = &["section_id"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &["type", "content", "styles"];

    fn scope_from_row(row: &SqliteRow) -> Result<ComponentScope, sqlx::Error> {
        Ok(ComponentScope(row.try_get("section_id")?))
    }
}

impl SiblingRecord for ComponentKind {
    type Record = Component;

    fn fetch<'c>(conn: &'c mut SqliteConnection, id: Uuid) -> BoxFuture<'c, Result<Component, BackendError>> {
        Box::pin(async move { find(conn, id).await?.or_not_found("Component", id) })
    }
}

/// Column list matching [`component_from_row`]
pub(crate) const COMPONENT_COLUMNS: &str =
    "id, type, content, styles, section_id, position, created_at, updated_at";

/// Map a row selecting [`COMPONENT_COLUMNS`]
pub(crate) fn component_from_row(row: &SqliteRow) -> Result<Component, sqlx::Error> {
    let component_type: String = row.try_get("type")?;
    let component_type = component_type
        .parse::<ComponentType>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let content: Json<serde_json::Value> = row.try_get("content")?;
    let styles: Option<Json<serde_json::Value>> = row.try_get("styles")?;

    Ok(Component {
        id: row.try_get("id")?,
        component_type,
        content: content.0,
        styles: styles.map(|s| s.0),
        section_id: row.try_get("section_id")?,
        order: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Get a component by ID
///
/// # Returns
/// Component or None if not found
pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<Component>, BackendError> {
    let sql = format!("SELECT {} FROM components WHERE id = ?", COMPONENT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    Ok(row.as_ref().map(component_from_row).transpose()?)
}

/// Get a component by ID, failing with `NotFound`
pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Component, BackendError> {
    find(pool, id).await?.or_not_found("Component", id)
}

/// Components of a section in position order
pub async fn list_by_section(pool: &SqlitePool, section_id: Uuid) -> Result<Vec<Component>, BackendError> {
    let sql = format!(
        "SELECT {} FROM components WHERE section_id = ? ORDER BY position",
        COMPONENT_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(section_id).fetch_all(pool).await?;
    Ok(rows.iter().map(component_from_row).collect::<Result<_, _>>()?)
}

/// Create a component, appended or inserted at `request.order`
///
/// # Errors
/// `NotFound` if the section does not exist
pub async fn create(db: &Database, request: CreateComponentRequest) -> Result<Component, BackendError> {
    db.transaction("create component", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let scope = ComponentScope(request.section_id);
            ops::require_parent(conn, scope).await?;
            let position = ops::reserve_slot::<ComponentKind>(conn, scope, request.order).await?;

            let id = Uuid::new_v4();
            let now = Utc::now();
            sqlx::query(
                r#"
                INSERT INTO components (id, type, content, styles, section_id, position, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(request.component_type.as_str())
            .bind(Json(&request.content))
            .bind(request.styles.as_ref().map(Json))
            .bind(request.section_id)
            .bind(position)
            .bind(now)
            .bind(now)
            .execute(&mut *conn)
            .await?;

            find(&mut *conn, id).await?.or_not_found("Component", id)
        })
    })
    .await
}

/// Update a component's fields; a changed `order` is applied as a reorder
pub async fn update(db: &Database, id: Uuid, request: UpdateComponentRequest) -> Result<Component, BackendError> {
    db.transaction("update component", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let placement = ops::locate::<ComponentKind>(conn, id).await?;
            if let Some(order) = request.order {
                ops::reorder_in::<ComponentKind>(conn, id, order).await?;
                ops::verify_density::<ComponentKind>(conn, placement.scope).await?;
            }

            sqlx::query(
                r#"
                UPDATE components
                SET type = COALESCE(?, type),
                    content = COALESCE(?, content),
                    styles = CASE WHEN ? THEN ? ELSE styles END,
                    updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(request.component_type.map(|t| t.as_str()))
            .bind(request.content.as_ref().map(Json))
            .bind(request.styles.is_some())
            .bind(request.styles.as_ref().and_then(Option::as_ref).map(Json))
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;

            find(&mut *conn, id).await?.or_not_found("Component", id)
        })
    })
    .await
}
