//! Page types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::models::section::SectionDetail;
use crate::shared::validation::{require_length, require_optional_length, require_position, require_slug};

/// A page of a website, ordered among the website's pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_home: bool,
    pub order: i64,
    pub website_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page together with its ordered sections and their components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetail {
    #[serde(flatten)]
    pub page: Page,
    pub sections: Vec<SectionDetail>,
}

/// Body of `POST /api/pages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub name: String,
    pub slug: String,
    pub website_id: Uuid,
    pub is_home: Option<bool>,
    /// Target position; appended at the end when absent
    pub order: Option<i64>,
}

/// Body of `PUT /api/pages/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub is_home: Option<bool>,
    pub order: Option<i64>,
}

impl CreatePageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_length("name", &self.name, 1, 200)?;
        require_slug("slug", &self.slug)?;
        require_position("order", self.order)
    }
}

impl UpdatePageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("name", self.name.as_deref(), 1, 200)?;
        if let Some(slug) = &self.slug {
            require_slug("slug", slug)?;
        }
        require_position("order", self.order)
    }
}
