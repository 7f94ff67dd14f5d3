use serde::Serialize;

use crate::entities::DownloadItem;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DownloadsState {
    pub downloads: Vec<DownloadItem>,
}

impl SliceState for DownloadsState {}

impl DownloadsState {
    pub fn get(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }

    /// Downloads of one material, oldest first.
    pub fn for_material<'a>(&'a self, material_id: &'a str) -> impl Iterator<Item = &'a DownloadItem> {
        self.downloads
            .iter()
            .filter(move |d| d.material_id == material_id)
    }

    /// Items that are neither completed nor failed.
    pub fn active_count(&self) -> usize {
        self.downloads
            .iter()
            .filter(|d| !d.status.is_finished())
            .count()
    }
}
