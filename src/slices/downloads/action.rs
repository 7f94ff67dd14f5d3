use crate::entities::{DownloadItem, DownloadStatus};
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadsAction {
    /// Append a download to the queue.
    Add(DownloadItem),
    /// Progress report from the download executor. Moves a pending item to
    /// downloading.
    UpdateProgress { id: String, progress: u8 },
    SetStatus { id: String, status: DownloadStatus },
    Remove { id: String },
}

impl Action for DownloadsAction {}
