//! Unidirectional data-flow primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                  │
//!    └──────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of one slice of the tree
//! - **Action**: A synchronous command or an async lifecycle event
//! - **Reducer**: Pure function that transforms state based on actions

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::SliceState;
