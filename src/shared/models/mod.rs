//! Request and response models
//!
//! One submodule per resource. Every type serializes with camelCase field
//! names; request types carry a `validate()` that reports the first bad field.

pub mod component;
pub mod image;
pub mod nullable;
pub mod page;
pub mod section;
pub mod template;
pub mod user;
pub mod website;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::require_position;

/// Body of the `PATCH .../reorder` endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub id: Uuid,
    pub new_order: i64,
}

impl ReorderRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_position("newOrder", Some(self.new_order))
    }
}

pub use component::{Component, ComponentType};
pub use image::Image;
pub use page::{Page, PageDetail};
pub use section::{Section, SectionDetail, SectionParent};
pub use template::Template;
pub use user::User;
pub use website::Website;
