use serde::{Deserialize, Serialize};

use crate::slices::theme::ThemeMode;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub materials: MaterialsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Simulated transport settings for the mock backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Round-trip time of ordinary calls in milliseconds (default: 500).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Round-trip time of the banner list call (default: 1000).
    #[serde(default = "default_banner_latency_ms")]
    pub banner_latency_ms: u64,
    /// Round-trip time of impression/click tracking (default: 100).
    #[serde(default = "default_tracking_latency_ms")]
    pub tracking_latency_ms: u64,
}

/// Paging and list sizes used by the materials slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Items per page of the general list (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Size of the "recent" shelf (default: 10).
    #[serde(default = "default_shelf_limit")]
    pub recent_limit: u32,
    /// Size of the "popular" shelf (default: 10).
    #[serde(default = "default_shelf_limit")]
    pub popular_limit: u32,
}

/// Store behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Drop settlements of list fetches that were overtaken by a newer
    /// request for the same operation (default: false).
    #[serde(default)]
    pub fence_stale_responses: bool,
    /// Theme applied when the store is created (default: light).
    #[serde(default)]
    pub initial_theme: ThemeMode,
}

fn default_latency_ms() -> u64 {
    500
}

fn default_banner_latency_ms() -> u64 {
    1000
}

fn default_tracking_latency_ms() -> u64 {
    100
}

fn default_page_size() -> u32 {
    20
}

fn default_shelf_limit() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            banner_latency_ms: default_banner_latency_ms(),
            tracking_latency_ms: default_tracking_latency_ms(),
        }
    }
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recent_limit: default_shelf_limit(),
            popular_limit: default_shelf_limit(),
        }
    }
}
