//! Section types
//!
//! A section hangs off either a page or a template, never both. Its position
//! is counted among the sections of that one parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::models::component::Component;
use crate::shared::validation::{require_length, require_optional_length, require_position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub order: i64,
    pub page_id: Option<Uuid>,
    pub template_id: Option<Uuid>,
    pub styles: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A section with its ordered components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDetail {
    #[serde(flatten)]
    pub section: Section,
    pub components: Vec<Component>,
}

/// Body of `POST /api/sections`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub name: String,
    pub page_id: Option<Uuid>,
    pub template_id: Option<Uuid>,
    pub order: Option<i64>,
    pub styles: Option<serde_json::Value>,
}

/// Body of `PUT /api/sections/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub styles: Option<Option<serde_json::Value>>,
}

/// Body of `PATCH /api/sections/move`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSectionRequest {
    pub id: Uuid,
    pub target_page_id: Option<Uuid>,
    pub target_template_id: Option<Uuid>,
    pub new_order: Option<i64>,
}

/// Which kind of parent a section belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionParent {
    Page(Uuid),
    Template(Uuid),
}

/// Resolve a `(pageId, templateId)` pair into exactly one parent
pub fn section_parent(
    page_id: Option<Uuid>,
    template_id: Option<Uuid>,
    field: &str,
) -> Result<SectionParent, SharedError> {
    match (page_id, template_id) {
        (Some(page_id), None) => Ok(SectionParent::Page(page_id)),
        (None, Some(template_id)) => Ok(SectionParent::Template(template_id)),
        (Some(_), Some(_)) => Err(SharedError::validation(
            field,
            "a section belongs to a page or a template, not both",
        )),
        (None, None) => Err(SharedError::validation(field, "pageId or templateId is required")),
    }
}

impl CreateSectionRequest {
    pub fn validate(&self) -> Result<SectionParent, SharedError> {
        require_length("name", &self.name, 1, 200)?;
        require_position("order", self.order)?;
        section_parent(self.page_id, self.template_id, "pageId")
    }
}

impl UpdateSectionRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("name", self.name.as_deref(), 1, 200)?;
        require_position("order", self.order)
    }
}

impl MoveSectionRequest {
    pub fn validate(&self) -> Result<SectionParent, SharedError> {
        require_position("newOrder", self.new_order)?;
        section_parent(self.target_page_id, self.target_template_id, "targetPageId")
    }
}
