//! Template library types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{require_length, require_optional_length};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Free-form category (landing, blog, portfolio, ...)
    #[serde(rename = "type")]
    pub template_type: String,
    pub thumbnail: Option<String>,
    pub content: serde_json::Value,
    pub is_public: bool,
    pub is_predefined: bool,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/templates`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub template_type: String,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub content: serde_json::Value,
    pub is_public: Option<bool>,
    pub is_predefined: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Body of `PUT /api/templates/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub thumbnail: Option<Option<String>>,
    pub content: Option<serde_json::Value>,
    pub is_public: Option<bool>,
    pub is_predefined: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Query string of `GET /api/templates`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFilters {
    pub is_public: Option<bool>,
    pub is_predefined: Option<bool>,
    #[serde(rename = "type")]
    pub template_type: Option<String>,
}

impl CreateTemplateRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_length("name", &self.name, 1, 100)?;
        require_optional_length("description", self.description.as_deref(), 0, 500)?;
        require_length("type", &self.template_type, 1, 100)
    }
}

impl UpdateTemplateRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("name", self.name.as_deref(), 1, 100)?;
        require_optional_length("description", self.description.as_ref().and_then(Option::as_deref), 0, 500)?;
        require_optional_length("type", self.template_type.as_deref(), 1, 100)
    }
}
