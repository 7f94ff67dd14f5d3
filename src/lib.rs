//! Client-side state store for a learning platform.
//!
//! Slices for auth, categories, materials, banners, downloads and theme are
//! combined under one [`store::Store`] that runs async requests against
//! pluggable API ports.

pub mod api;
pub mod config;
pub mod entities;
pub mod logging;
pub mod slices;
pub mod store;

pub use api::{ApiClients, ApiError, MockApi, MockLatency};
pub use config::Config;
pub use slices::AppState;
pub use store::{Store, Thunk, ThunkError};
