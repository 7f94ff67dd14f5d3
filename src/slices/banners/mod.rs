//! Promotional banner carousel slice.

mod action;
mod reducer;
mod state;

pub use action::BannersAction;
pub use reducer::BannersReducer;
pub use state::BannersState;
