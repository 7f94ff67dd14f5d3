//! Materials slice.
//!
//! Materials are stored once in a [`MaterialTable`]; the paged list, the
//! search results and the current material are id references into it, so a
//! bookmark, progress or view update lands on every live view at once. The
//! recent, popular and bookmarked shelves are point-in-time snapshots that
//! are only replaced by their own fetches.

mod action;
mod reducer;
mod state;
mod table;

pub use action::MaterialsAction;
pub use reducer::MaterialsReducer;
pub use state::{MaterialsState, Pagination};
pub use table::MaterialTable;
