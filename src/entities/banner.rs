use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a banner is drawn by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerVariant {
    #[default]
    Default,
    Gradient,
    Image,
    Announcement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// A promotional or announcement banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gradient_colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_icon: Option<String>,
    #[serde(rename = "type", default)]
    pub variant: BannerVariant,
    #[serde(default)]
    pub priority: BannerPriority,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub target_audience: Vec<String>,
    #[serde(default)]
    pub click_count: u64,
    #[serde(default)]
    pub impression_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// True when the banner is switched on and `now` falls inside its
    /// optional date window. Both window bounds are inclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if self.start_date.is_some_and(|start| start > now) {
            return false;
        }
        if self.end_date.is_some_and(|end| end < now) {
            return false;
        }
        true
    }
}
