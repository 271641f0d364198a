//! Component types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::require_position;

/// Kind of building block a component renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Header,
    Text,
    Button,
    Image,
    Card,
    Countdown,
    Form,
    Agenda,
    Carousel,
    BulletList,
    Testimonial,
    Gallery,
    Speakers,
    Counter,
    Navbar,
    Footer,
    InnerSection,
}

impl ComponentType {
    pub const ALL: [ComponentType; 17] = [
        ComponentType::Header,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Card,
        ComponentType::Countdown,
        ComponentType::Form,
        ComponentType::Agenda,
        ComponentType::Carousel,
        ComponentType::BulletList,
        ComponentType::Testimonial,
        ComponentType::Gallery,
        ComponentType::Speakers,
        ComponentType::Counter,
        ComponentType::Navbar,
        ComponentType::Footer,
        ComponentType::InnerSection,
    ];

    /// Stored / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Header => "HEADER",
            ComponentType::Text => "TEXT",
            ComponentType::Button => "BUTTON",
            ComponentType::Image => "IMAGE",
            ComponentType::Card => "CARD",
            ComponentType::Countdown => "COUNTDOWN",
            ComponentType::Form => "FORM",
            ComponentType::Agenda => "AGENDA",
            ComponentType::Carousel => "CAROUSEL",
            ComponentType::BulletList => "BULLET_LIST",
            ComponentType::Testimonial => "TESTIMONIAL",
            ComponentType::Gallery => "GALLERY",
            ComponentType::Speakers => "SPEAKERS",
            ComponentType::Counter => "COUNTER",
            ComponentType::Navbar => "NAVBAR",
            ComponentType::Footer => "FOOTER",
            ComponentType::InnerSection => "INNER_SECTION",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SharedError::validation("type", format!("unknown component type '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub content: serde_json::Value,
    pub styles: Option<serde_json::Value>,
    pub section_id: Uuid,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/components`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentRequest {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub content: serde_json::Value,
    pub section_id: Uuid,
    pub order: Option<i64>,
    pub styles: Option<serde_json::Value>,
}

/// Body of `PUT /api/components/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentRequest {
    #[serde(rename = "type")]
    pub component_type: Option<ComponentType>,
    pub content: Option<serde_json::Value>,
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
    pub styles: Option<Option<serde_json::Value>>,
}

/// Body of `PATCH /api/components/move`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveComponentRequest {
    pub id: Uuid,
    pub target_section_id: Uuid,
    pub new_order: Option<i64>,
}

impl CreateComponentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_position("order", self.order)
    }
}

impl UpdateComponentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_position("order", self.order)
    }
}

impl MoveComponentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_position("newOrder", self.new_order)
    }
}
