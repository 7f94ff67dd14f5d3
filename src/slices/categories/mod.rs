//! Category grid slice.

mod action;
mod reducer;
mod state;

pub use action::CategoriesAction;
pub use reducer::CategoriesReducer;
pub use state::CategoriesState;
