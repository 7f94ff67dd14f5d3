//! Download queue slice.

mod action;
mod reducer;
mod state;

pub use action::DownloadsAction;
pub use reducer::DownloadsReducer;
pub use state::DownloadsState;
