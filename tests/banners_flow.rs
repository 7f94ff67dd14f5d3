mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{banner, make_store, store_with};
use learning_store::api::Endpoint;
use learning_store::slices::banners::BannersAction;
use learning_store::{Config, MockApi, MockLatency};

#[tokio::test]
async fn only_switched_on_banners_are_active() {
    let api = Arc::new(MockApi::empty(MockLatency::none()).with_banners(vec![
        banner("1", true, None),
        banner("2", true, None),
        banner("3", false, None),
        banner("4", true, None),
    ]));
    let store = store_with(&api, &Config::default());

    store.fetch_banners().await.unwrap();
    let state = store.get_state();
    assert_eq!(state.banners.banners.len(), 4);
    assert_eq!(state.banners.active_banners.len(), 3);
    assert!(state.banners.active_banners.iter().all(|b| b.id != "3"));
}

#[tokio::test]
async fn future_start_activates_on_recompute() {
    let api = Arc::new(MockApi::empty(MockLatency::none()).with_banners(vec![banner(
        "soon",
        true,
        Some(Utc::now() + Duration::hours(1)),
    )]));
    let store = store_with(&api, &Config::default());

    store.fetch_banners().await.unwrap();
    assert!(store.get_state().banners.active_banners.is_empty());

    // The cached copy is re-evaluated at a time past its start.
    store.dispatch(BannersAction::UpdateActive {
        now: Utc::now() + Duration::hours(2),
    });
    assert_eq!(store.get_state().banners.active_banners.len(), 1);
}

#[tokio::test]
async fn update_active_uses_wall_clock() {
    let api = Arc::new(MockApi::empty(MockLatency::none()).with_banners(vec![banner(
        "now",
        true,
        Some(Utc::now() - Duration::minutes(1)),
    )]));
    let store = store_with(&api, &Config::default());
    store.fetch_banners().await.unwrap();
    store.update_active_banners();
    assert_eq!(store.get_state().banners.active_banners.len(), 1);
}

#[tokio::test]
async fn seeded_banners_are_all_live() {
    let (_, store) = make_store();
    store.fetch_banners().await.unwrap();
    let state = store.get_state();
    assert_eq!(state.banners.banners.len(), 4);
    assert_eq!(state.banners.active_banners.len(), 4);
}

#[tokio::test]
async fn tracking_increments_counters() {
    let (api, store) = make_store();
    store.fetch_banners().await.unwrap();

    store.track_banner_impression("1").await.unwrap();
    store.track_banner_impression("1").await.unwrap();
    store.track_banner_click("1").await.unwrap();

    let state = store.get_state();
    let local = state.banners.get("1").unwrap();
    assert_eq!(local.impression_count, 2);
    assert_eq!(local.click_count, 1);
    assert_eq!(api.banner("1").unwrap().impression_count, 2);
}

#[tokio::test]
async fn tracking_failure_is_swallowed() {
    let (api, store) = make_store();
    store.fetch_banners().await.unwrap();
    api.fail(Endpoint::TrackClick, "tracking down");

    assert!(store.track_banner_click("1").await.is_err());
    let state = store.get_state();
    assert_eq!(state.banners.error, None);
    assert_eq!(state.banners.get("1").unwrap().click_count, 0);
}

#[tokio::test]
async fn fetch_failure_sets_error() {
    let (api, store) = make_store();
    api.fail(Endpoint::GetBanners, "Failed to fetch banners");
    assert!(store.fetch_banners().await.is_err());
    let state = store.get_state();
    assert!(!state.banners.is_loading);
    assert_eq!(state.banners.error.as_deref(), Some("Failed to fetch banners"));
}
