//! Website types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{require_length, require_one_of, require_optional_length};

/// Allowed values of `Website::theme`
pub const THEMES: &[&str] = &["light", "dark", "custom"];

/// Allowed values of `Website::status`
pub const STATUSES: &[&str] = &["draft", "published", "archived"];

/// A user's website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Opaque site-level content document
    pub content: serde_json::Value,
    pub theme: String,
    pub status: String,
    pub seo_score: Option<i64>,
    pub template_id: Option<Uuid>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/websites`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub content: serde_json::Value,
    pub theme: Option<String>,
    pub status: Option<String>,
    pub seo_score: Option<i64>,
    pub template_id: Option<Uuid>,
    pub user_id: Uuid,
}

/// Body of `PUT /api/websites/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebsiteRequest {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub description: Option<Option<String>>,
    pub content: Option<serde_json::Value>,
    pub theme: Option<String>,
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub seo_score: Option<Option<i64>>,
    pub template_id: Option<Uuid>,
}

fn check_seo_score(score: Option<i64>) -> Result<(), SharedError> {
    match score {
        Some(score) if !(0..=100).contains(&score) => {
            Err(SharedError::validation("seoScore", "must be between 0 and 100"))
        }
        _ => Ok(()),
    }
}

impl CreateWebsiteRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_length("name", &self.name, 1, 100)?;
        require_optional_length("description", self.description.as_deref(), 0, 500)?;
        if let Some(theme) = &self.theme {
            require_one_of("theme", theme, THEMES)?;
        }
        if let Some(status) = &self.status {
            require_one_of("status", status, STATUSES)?;
        }
        check_seo_score(self.seo_score)
    }
}

impl UpdateWebsiteRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("name", self.name.as_deref(), 1, 100)?;
        require_optional_length("description", self.description.as_ref().and_then(Option::as_deref), 0, 500)?;
        if let Some(theme) = &self.theme {
            require_one_of("theme", theme, THEMES)?;
        }
        if let Some(status) = &self.status {
            require_one_of("status", status, STATUSES)?;
        }
        check_seo_score(self.seo_score.flatten())
    }
}
