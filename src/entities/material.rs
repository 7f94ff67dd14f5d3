use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File kind of a learning material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Pdf,
    Ppt,
    Doc,
    Video,
    Image,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialType::Pdf => "pdf",
            MaterialType::Ppt => "ppt",
            MaterialType::Doc => "doc",
            MaterialType::Video => "video",
            MaterialType::Image => "image",
        };
        f.write_str(name)
    }
}

/// A single learning material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Size in bytes.
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: BTreeSet<String>,
    pub is_bookmarked: bool,
    /// Reading progress, 0-100.
    pub progress: u8,
    pub views: u64,
    pub downloads: u64,
}

impl Material {
    /// Case-insensitive match against title, description and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}
