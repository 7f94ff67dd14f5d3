//! Runtime configuration for the store and its mock backend.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, MaterialsConfig, StoreConfig};
