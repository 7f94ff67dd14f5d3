//! Light/dark theme slice.
//!
//! Purely synchronous: no request lifecycle is involved.

mod action;
mod reducer;
mod state;

pub use action::ThemeAction;
pub use reducer::ThemeReducer;
pub use state::{Palette, ThemeMode, ThemeState, DARK_PALETTE, LIGHT_PALETTE};
