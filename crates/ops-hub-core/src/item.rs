//! Toolbox Item Entity
//!
//! One tracked operational resource. The board placement lives in the
//! opaque `metadata` string; see `classification` for its encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::{Classification, ClassificationPayload};
use crate::entity::{DomainError, DomainResult, Entity};

/// Item type, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Process,
    #[default]
    System,
    Equipment,
    Software,
    Team,
    Idea,
    Event,
}

impl ItemType {
    pub const ALL: [ItemType; 7] = [
        ItemType::Process,
        ItemType::System,
        ItemType::Equipment,
        ItemType::Software,
        ItemType::Team,
        ItemType::Idea,
        ItemType::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Process => "process",
            ItemType::System => "system",
            ItemType::Equipment => "equipment",
            ItemType::Software => "software",
            ItemType::Team => "team",
            ItemType::Idea => "idea",
            ItemType::Event => "event",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ItemType::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Card icon name
    pub fn icon(&self) -> &'static str {
        match self {
            ItemType::Process => "GitBranch",
            ItemType::System => "Server",
            ItemType::Equipment => "Wrench",
            ItemType::Software => "Code",
            ItemType::Team => "Users",
            ItemType::Idea => "Lightbulb",
            ItemType::Event => "Calendar",
        }
    }
}

/// Active/inactive flag, toggled independently of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ItemStatus::Active),
            "inactive" => Some(ItemStatus::Inactive),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ItemStatus::Active => ItemStatus::Inactive,
            ItemStatus::Inactive => ItemStatus::Active,
        }
    }

    /// Icon of the button that flips this status
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ItemStatus::Active => "Pause",
            ItemStatus::Inactive => "Play",
        }
    }
}

/// A stored toolbox record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxItem {
    /// Assigned by the record store
    pub id: u32,
    pub name: String,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub description: String,
    pub tags: Option<String>,
    /// Refreshed on every mutation
    pub last_updated: DateTime<Utc>,
    /// Serialized classification payload
    pub metadata: Option<String>,
}

impl ToolboxItem {
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

impl Entity for ToolboxItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Fields for creating a toolbox record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToolboxItem {
    pub name: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub metadata: Option<String>,
}

impl NewToolboxItem {
    /// New active item placed in the default bucket
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            status: ItemStatus::Active,
            description: String::new(),
            tags: None,
            metadata: Some(ClassificationPayload::new(Classification::default()).to_metadata()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::CreateRejected("name: must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Partial update; `None` leaves the stored field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl ItemPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    pub fn metadata(metadata: impl Into<String>) -> Self {
        Self { metadata: Some(metadata.into()), ..Default::default() }
    }

    /// Checks every supplied field; a single bad field rejects the whole patch.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::UpdateRejected("name: must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Applies the supplied fields and stamps `last_updated`.
    pub fn apply_to(&self, item: &mut ToolboxItem, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            item.tags = Some(tags.clone());
        }
        if let Some(metadata) = &self.metadata {
            item.metadata = Some(metadata.clone());
        }
        item.last_updated = now;
    }
}
