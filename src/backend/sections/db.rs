//! Database operations for sections
//!
//! A section belongs to exactly one page or one template and is ordered
//! among that parent's sections. Reads return sections with their ordered
//! components attached.

use std::collections::HashMap;

use chrono::Utc;
use futures_util::future::BoxFuture;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection, SqliteExecutor};
use uuid::Uuid;

use crate::backend::components::db::{component_from_row, COMPONENT_COLUMNS};
use crate::backend::db::Database;
use crate::backend::error::{BackendError, OrNotFound};
use crate::backend::ordering::{ops, ParentScope, SiblingKind, SiblingRecord};
use crate::shared::models::component::Component;
use crate::shared::models::section::{
    CreateSectionRequest, Section, SectionDetail, SectionParent, UpdateSectionRequest,
};

/// Sections of one page, or of one template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionScope {
    Page(Uuid),
    Template(Uuid),
}

impl ParentScope for SectionScope {
    fn column(&self) -> &'static str {
        match self {
            SectionScope::Page(_) => "page_id",
            SectionScope::Template(_) => "template_id",
        }
    }

    fn key(&self) -> Uuid {
        match self {
            SectionScope::Page(id) | SectionScope::Template(id) => *id,
        }
    }

    fn parent_table(&self) -> &'static str {
        match self {
            SectionScope::Page(_) => "pages",
            SectionScope::Template(_) => "templates",
        }
    }

    fn parent_label(&self) -> &'static str {
        match self {
            SectionScope::Page(_) => "Page",
            SectionScope::Template(_) => "Template",
        }
    }

    fn assignments(&self) -> Vec<(&'static str, Option<Uuid>)> {
        match self {
            SectionScope::Page(id) => vec![("page_id", Some(*id)), ("template_id", None)],
            SectionScope::Template(id) => vec![("page_id", None), ("template_id", Some(*id))],
        }
    }
}

impl From<SectionParent> for SectionScope {
    fn from(parent: SectionParent) -> Self {
        match parent {
            SectionParent::Page(id) => SectionScope::Page(id),
            SectionParent::Template(id) => SectionScope::Template(id),
        }
    }
}

/// The `sections` table as an ordered sibling list
pub struct SectionKind;

impl SiblingKind for SectionKind {
    type Scope = SectionScope;

    const TABLE: &'static str = "sections";
    const LABEL: &'static str = "Section";
    const PARENT_COLUMNS: &'static [&'static str] = &["page_id", "template_id"];
    const PAYLOAD_COLUMNS: &'static [&'static str] = &["name", "styles"];

    fn scope_from_row(row: &SqliteRow) -> Result<SectionScope, sqlx::Error> {
        let page_id: Option<Uuid> = row.try_get("page_id")?;
        let template_id: Option<Uuid> = row.try_get("template_id")?;
        match (page_id, template_id) {
            (Some(page_id), None) => Ok(SectionScope::Page(page_id)),
            (None, Some(template_id)) => Ok(SectionScope::Template(template_id)),
            _ => Err(sqlx::Error::Decode(
                "section row must reference exactly one of page_id, template_id".into(),
            )),
        }
    }
}

impl SiblingRecord for SectionKind {
    type Record = SectionDetail;

    fn fetch<'c>(conn: &'c mut SqliteConnection, id: Uuid) -> BoxFuture<'c, Result<SectionDetail, BackendError>> {
        Box::pin(get_detail(conn, id))
    }
}

const SECTION_COLUMNS: &str = "id, name, position, page_id, template_id, styles, created_at, updated_at";

fn section_from_row(row: &SqliteRow) -> Result<Section, sqlx::Error> {
    let styles: Option<Json<serde_json::Value>> = row.try_get("styles")?;
    Ok(Section {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        order: row.try_get("position")?,
        page_id: row.try_get("page_id")?,
        template_id: row.try_get("template_id")?,
        styles: styles.map(|s| s.0),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<Section>, BackendError> {
    let sql = format!("SELECT {} FROM sections WHERE id = ?", SECTION_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    Ok(row.as_ref().map(section_from_row).transpose()?)
}

/// Get a section with its components
pub async fn get_detail(conn: &mut SqliteConnection, id: Uuid) -> Result<SectionDetail, BackendError> {
    let section = find(&mut *conn, id).await?.or_not_found("Section", id)?;
    let sql = format!(
        "SELECT {} FROM components WHERE section_id = ? ORDER BY position",
        COMPONENT_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(id).fetch_all(&mut *conn).await?;
    let components = rows.iter().map(component_from_row).collect::<Result<_, _>>()?;

    Ok(SectionDetail { section, components })
}

/// Sections of `scope` in position order, each with its ordered components
///
/// Two queries regardless of the number of sections.
pub async fn list_details(conn: &mut SqliteConnection, scope: SectionScope) -> Result<Vec<SectionDetail>, BackendError> {
    let sql = format!(
        "SELECT {} FROM sections WHERE {} = ? ORDER BY position",
        SECTION_COLUMNS,
        scope.column()
    );
    let rows = sqlx::query(&sql).bind(scope.key()).fetch_all(&mut *conn).await?;
    let sections = rows.iter().map(section_from_row).collect::<Result<Vec<_>, _>>()?;

    let qualified: Vec<String> = COMPONENT_COLUMNS
        .split(", ")
        .map(|col| format!("c.{}", col))
        .collect();
    let sql = format!(
        "SELECT {} FROM components c JOIN sections s ON s.id = c.section_id \
         WHERE s.{} = ? ORDER BY c.position",
        qualified.join(", "),
        scope.column()
    );
    let rows = sqlx::query(&sql).bind(scope.key()).fetch_all(&mut *conn).await?;

    let mut by_section: HashMap<Uuid, Vec<Component>> = HashMap::new();
    for row in &rows {
        let component = component_from_row(row)?;
        by_section.entry(component.section_id).or_default().push(component);
    }

    Ok(sections
        .into_iter()
        .map(|section| {
            let components = by_section.remove(&section.id).unwrap_or_default();
            SectionDetail { section, components }
        })
        .collect())
}

/// Create a section under `parent`, appended or inserted at `request.order`
///
/// # Errors
/// `NotFound` if the page or template does not exist
pub async fn create(
    db: &Database,
    parent: SectionParent,
    request: CreateSectionRequest,
) -> Result<SectionDetail, BackendError> {
    db.transaction("create section", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let scope = SectionScope::from(parent);
            ops::require_parent(conn, scope).await?;
            let position = ops::reserve_slot::<SectionKind>(conn, scope, request.order).await?;

            let (page_id, template_id) = match parent {
                SectionParent::Page(id) => (Some(id), None),
                SectionParent::Template(id) => (None, Some(id)),
            };
            let id = Uuid::new_v4();
            let now = Utc::now();
            sqlx::query(
                r#"
                INSERT INTO sections (id, name, position, page_id, template_id, styles, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(&request.name)
            .bind(position)
            .bind(page_id)
            .bind(template_id)
            .bind(request.styles.as_ref().map(Json))
            .bind(now)
            .bind(now)
            .execute(&mut *conn)
            .await?;

            get_detail(conn, id).await
        })
    })
    .await
}

/// Update a section's name, styles and (via reorder) position
pub async fn update(db: &Database, id: Uuid, request: UpdateSectionRequest) -> Result<SectionDetail, BackendError> {
    db.transaction("update section", move |conn| {
        let request = request.clone();
        Box::pin(async move {
            let placement = ops::locate::<SectionKind>(conn, id).await?;
            if let Some(order) = request.order {
                ops::reorder_in::<SectionKind>(conn, id, order).await?;
                ops::verify_density::<SectionKind>(conn, placement.scope).await?;
            }

            sqlx::query(
                r#"
                UPDATE sections
                SET name = COALESCE(?, name),
                    styles = CASE WHEN ? THEN ? ELSE styles END,
                    updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(request.name.as_deref())
            .bind(request.styles.is_some())
            .bind(request.styles.as_ref().and_then(Option::as_ref).map(Json))
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;

            get_detail(conn, id).await
        })
    })
    .await
}
