//! Shared test utilities.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use learning_store::entities::{Banner, BannerPriority, BannerVariant, Material, MaterialType};
use learning_store::{ApiClients, Config, MockApi, MockLatency, Store};
use tempfile::TempDir;

/// Long enough that a concurrently issued zero-latency call settles first.
pub const SLOW: Duration = Duration::from_millis(150);

/// Seeded backend with no simulated latency.
pub fn seeded_api() -> Arc<MockApi> {
    Arc::new(MockApi::seeded(MockLatency::none()))
}

pub fn store_with(api: &Arc<MockApi>, config: &Config) -> Store {
    Store::new(ApiClients::from_shared(api.clone()), config)
}

/// Default-config store over a seeded zero-latency backend.
pub fn make_store() -> (Arc<MockApi>, Store) {
    let api = seeded_api();
    let store = store_with(&api, &Config::default());
    (api, store)
}

pub fn fenced_config() -> Config {
    let mut config = Config::default();
    config.store.fence_stale_responses = true;
    config
}

pub fn material(id: &str, views: u64) -> Material {
    let created_at = Utc::now();
    Material {
        id: id.to_string(),
        title: format!("Material {id}"),
        description: format!("Description of {id}"),
        category_id: "safety".to_string(),
        material_type: MaterialType::Pdf,
        file_url: format!("https://files.example/{id}.pdf"),
        thumbnail_url: None,
        size: 1024,
        created_at,
        updated_at: created_at,
        tags: BTreeSet::new(),
        is_bookmarked: false,
        progress: 0,
        views,
        downloads: 0,
    }
}

pub fn banner(id: &str, is_active: bool, start_date: Option<DateTime<Utc>>) -> Banner {
    let now = Utc::now();
    Banner {
        id: id.to_string(),
        title: format!("Banner {id}"),
        subtitle: None,
        description: None,
        image_url: None,
        gradient_colors: Vec::new(),
        button_text: None,
        button_icon: None,
        variant: BannerVariant::Default,
        priority: BannerPriority::Medium,
        is_active,
        start_date,
        end_date: None,
        target_audience: Vec::new(),
        click_count: 0,
        impression_count: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
