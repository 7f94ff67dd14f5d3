mod common;

use common::{fenced_config, seeded_api, store_with, SLOW};
use learning_store::api::{Endpoint, MaterialQuery};
use learning_store::{Config, ThunkError};

#[tokio::test]
async fn unfenced_store_lets_late_response_win() {
    let api = seeded_api();
    let store = store_with(&api, &Config::default());

    api.push_delay(Endpoint::SearchCategories, SLOW);
    let slow = store.search_categories("safety");
    let fast = store.search_categories("track");

    fast.await.unwrap();
    slow.await.unwrap();
    let state = store.get_state();
    assert_eq!(state.categories.categories[0].id, "safety");
}

#[tokio::test]
async fn fenced_store_drops_superseded_response() {
    let api = seeded_api();
    let store = store_with(&api, &fenced_config());

    api.push_delay(Endpoint::SearchCategories, SLOW);
    let slow = store.search_categories("safety");
    let fast = store.search_categories("track");

    fast.await.unwrap();
    assert_eq!(
        slow.await,
        Err(ThunkError::Superseded {
            operation: "categories/searchCategories"
        })
    );
    let state = store.get_state();
    assert_eq!(state.categories.categories.len(), 1);
    assert_eq!(state.categories.categories[0].id, "track");
    assert!(!state.categories.is_loading);
}

#[tokio::test]
async fn slow_category_fetch_does_not_overwrite_newer_search() {
    let api = seeded_api();
    let store = store_with(&api, &fenced_config());

    api.push_delay(Endpoint::GetCategories, SLOW);
    let fetch = store.fetch_categories();
    let search = store.search_categories("track");

    search.await.unwrap();
    assert_eq!(
        fetch.await,
        Err(ThunkError::Superseded {
            operation: "categories/fetchCategories"
        })
    );
    let state = store.get_state();
    assert!(!state.categories.is_loading);
    assert_eq!(state.categories.categories.len(), 1);
    assert_eq!(state.categories.categories[0].id, "track");
}

#[tokio::test]
async fn appended_page_does_not_cancel_its_first_page() {
    let api = seeded_api();
    let store = store_with(&api, &fenced_config());

    store
        .fetch_materials(MaterialQuery::first_page(20))
        .await
        .unwrap();
    api.push_delay(Endpoint::GetMaterials, SLOW);
    let page_two = store.load_more_materials().unwrap();
    page_two.await.unwrap();
    assert_eq!(store.get_state().materials.material_count(), 40);
}

#[tokio::test]
async fn new_first_page_drops_pending_append() {
    let api = seeded_api();
    let store = store_with(&api, &fenced_config());
    store
        .fetch_materials(MaterialQuery::first_page(20))
        .await
        .unwrap();

    api.push_delay(Endpoint::GetMaterials, SLOW);
    let stale_append = store.load_more_materials().unwrap();
    store
        .fetch_materials(MaterialQuery::first_page(20).in_category("track"))
        .await
        .unwrap();

    assert!(matches!(
        stale_append.await,
        Err(ThunkError::Superseded { .. })
    ));
    let state = store.get_state();
    assert!(state.materials.materials().all(|m| m.category_id == "track"));
    assert!(!state.materials.is_loading);
}

#[tokio::test]
async fn mutations_are_never_dropped() {
    let api = seeded_api();
    let store = store_with(&api, &fenced_config());
    store.fetch_material("m1").await.unwrap();

    api.push_delay(Endpoint::IncrementViews, SLOW);
    let slow = store.increment_views("m1");
    let fast = store.increment_views("m1");
    fast.await.unwrap();
    slow.await.unwrap();

    let views = api.material("m1").unwrap().views;
    assert_eq!(
        store.get_state().materials.current_material().unwrap().views,
        views
    );
}
