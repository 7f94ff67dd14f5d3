use serde::{Deserialize, Serialize};

use super::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Pending,
    Downloading,
    Completed,
    Failed,
}

impl DownloadStatus {
    /// Whether a download may move from `self` to `next`.
    ///
    /// `Failed -> Pending` is the retry edge. Staying in the same status is
    /// always allowed.
    pub fn can_transition_to(self, next: DownloadStatus) -> bool {
        use DownloadStatus::*;
        matches!(
            (self, next),
            (Pending, Downloading)
                | (Pending, Failed)
                | (Downloading, Completed)
                | (Downloading, Failed)
                | (Failed, Pending)
        ) || self == next
    }

    pub fn is_finished(self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Failed)
    }
}

/// A queued or running download of one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    pub id: String,
    pub material_id: String,
    pub title: String,
    pub status: DownloadStatus,
    /// 0-100.
    pub progress: u8,
}

impl DownloadItem {
    /// New pending download for `material` with a fresh id.
    pub fn for_material(material: &Material) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            material_id: material.id.clone(),
            title: material.title.clone(),
            status: DownloadStatus::Pending,
            progress: 0,
        }
    }
}
