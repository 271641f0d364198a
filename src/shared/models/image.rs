//! Image asset metadata
//!
//! Only bookkeeping lives here; the bytes are stored elsewhere and referenced by `url`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{require_length, require_optional_length};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    pub filename: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub alt: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/images`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub filename: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub alt: Option<String>,
    pub user_id: Uuid,
}

/// Body of `PUT /api/images/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    pub filename: Option<String>,
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub alt: Option<Option<String>>,
}

/// Body of `POST /api/images/delete-many`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyImagesRequest {
    pub ids: Vec<Uuid>,
    pub user_id: Uuid,
}

/// Pagination query (`?limit=&offset=`)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub search: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MimeTypeQuery {
    pub mime_type: String,
}

/// One page of a user's (or everyone's) images plus the unpaged total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePage {
    pub images: Vec<Image>,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total_images: i64,
    pub total_size: i64,
    pub average_size: i64,
}

impl ImageStats {
    pub fn new(total_images: i64, total_size: i64) -> Self {
        let average_size = if total_images > 0 {
            (total_size as f64 / total_images as f64).round() as i64
        } else {
            0
        };
        Self {
            total_images,
            total_size,
            average_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedImage {
    pub id: Uuid,
    pub deleted: bool,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedImages {
    pub deleted: u64,
    pub urls: Vec<String>,
}

fn require_http_url(field: &str, url: &str) -> Result<(), SharedError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(SharedError::validation(field, "must be an http(s) URL")),
    }
}

impl CreateImageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_length("filename", &self.filename, 1, 255)?;
        require_http_url("url", &self.url)?;
        if self.size < 0 {
            return Err(SharedError::validation("size", "must be zero or greater"));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(SharedError::validation("mimeType", "must be an image/* type"));
        }
        require_optional_length("alt", self.alt.as_deref(), 0, 500)
    }
}

impl UpdateImageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_optional_length("filename", self.filename.as_deref(), 1, 255)?;
        if let Some(url) = &self.url {
            require_http_url("url", url)?;
        }
        require_optional_length("alt", self.alt.as_ref().and_then(Option::as_deref), 0, 500)
    }
}

impl DeleteManyImagesRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.ids.is_empty() || self.ids.len() > 100 {
            return Err(SharedError::validation("ids", "must contain between 1 and 100 ids"));
        }
        Ok(())
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), SharedError> {
        if matches!(self.limit, Some(limit) if limit < 1) {
            return Err(SharedError::validation("limit", "must be at least 1"));
        }
        if matches!(self.offset, Some(offset) if offset < 0) {
            return Err(SharedError::validation("offset", "must be zero or greater"));
        }
        Ok(())
    }
}
