use tracing::warn;

use crate::entities::DownloadStatus;
use crate::store::mvi::Reducer;

use super::action::DownloadsAction;
use super::state::DownloadsState;

pub struct DownloadsReducer;

impl Reducer for DownloadsReducer {
    type State = DownloadsState;
    type Action = DownloadsAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            DownloadsAction::Add(item) => state.downloads.push(item),

            DownloadsAction::UpdateProgress { id, progress } => {
                for item in state.downloads.iter_mut().filter(|d| d.id == id) {
                    if item.status.is_finished() {
                        warn!(download = %id, status = ?item.status, "Progress for finished download ignored");
                        continue;
                    }
                    item.status = DownloadStatus::Downloading;
                    item.progress = progress.min(100);
                }
            }

            DownloadsAction::SetStatus { id, status } => {
                for item in state.downloads.iter_mut().filter(|d| d.id == id) {
                    if !item.status.can_transition_to(status) {
                        warn!(
                            download = %id,
                            from = ?item.status,
                            to = ?status,
                            "Illegal download transition ignored"
                        );
                        continue;
                    }
                    item.status = status;
                    match status {
                        DownloadStatus::Completed => item.progress = 100,
                        DownloadStatus::Pending => item.progress = 0,
                        DownloadStatus::Downloading | DownloadStatus::Failed => {}
                    }
                }
            }

            DownloadsAction::Remove { id } => state.downloads.retain(|d| d.id != id),
        }
        state
    }
}
