//! State slices. Each owns one region of the tree and the reducer for it.

pub mod auth;
pub mod banners;
pub mod categories;
pub mod downloads;
pub mod materials;
pub mod root;
pub mod theme;

pub use root::{AppAction, AppState, RootReducer};
