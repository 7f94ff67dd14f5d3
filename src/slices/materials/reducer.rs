use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Reducer;

use super::action::MaterialsAction;
use super::state::{MaterialsState, Pagination};

pub struct MaterialsReducer;

impl Reducer for MaterialsReducer {
    type State = MaterialsState;
    type Action = MaterialsAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            MaterialsAction::FetchList(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading, &mut state.error);
                if let Lifecycle::Fulfilled(meta, page) = lifecycle {
                    let ids = state.entities.upsert_all(page.materials);
                    if meta.arg.is_first_page() {
                        state.list = ids;
                        state.list_category = meta.arg.category_id;
                    } else {
                        state.list.extend(ids);
                    }
                    state.pagination = Pagination {
                        page: page.page,
                        limit: page.limit,
                        total: page.total,
                        has_more: page.has_more,
                    };
                    state.collect_garbage();
                }
            }

            MaterialsAction::FetchOne(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading_current, &mut state.error);
                if let Lifecycle::Fulfilled(_, material) = lifecycle {
                    state.current_id = Some(state.entities.upsert(material));
                    state.collect_garbage();
                }
            }

            MaterialsAction::Search(lifecycle) => {
                lifecycle.apply_status(&mut state.is_searching, &mut state.error);
                if let Lifecycle::Fulfilled(_, page) = lifecycle {
                    state.search_ids = state.entities.upsert_all(page.materials);
                    state.collect_garbage();
                }
            }

            MaterialsAction::FetchRecent(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading_recent, &mut state.error);
                if let Lifecycle::Fulfilled(_, materials) = lifecycle {
                    state.recent_materials = materials;
                }
            }

            MaterialsAction::FetchPopular(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading_popular, &mut state.error);
                if let Lifecycle::Fulfilled(_, materials) = lifecycle {
                    state.popular_materials = materials;
                }
            }

            MaterialsAction::FetchBookmarked(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading_bookmarked, &mut state.error);
                if let Lifecycle::Fulfilled(_, materials) = lifecycle {
                    state.bookmarked_materials = materials;
                }
            }

            MaterialsAction::ToggleBookmark(lifecycle) => match lifecycle {
                Lifecycle::Pending(_) => state.error = None,
                Lifecycle::Fulfilled(meta, toggled) => {
                    state
                        .entities
                        .patch(&meta.arg, |m| m.is_bookmarked = toggled.is_bookmarked);
                }
                Lifecycle::Rejected(_, reason) => state.error = Some(reason),
            },

            MaterialsAction::UpdateProgress(lifecycle) => match lifecycle {
                Lifecycle::Pending(_) => state.error = None,
                Lifecycle::Fulfilled(meta, updated) => {
                    state
                        .entities
                        .patch(&meta.arg, |m| m.progress = updated.progress.min(100));
                }
                Lifecycle::Rejected(_, reason) => state.error = Some(reason),
            },

            MaterialsAction::IncrementViews(lifecycle) => {
                if let Lifecycle::Fulfilled(meta, ()) = lifecycle {
                    state.entities.patch(&meta.arg, |m| m.views += 1);
                }
            }

            MaterialsAction::SetSearchQuery(query) => state.search_query = query,

            MaterialsAction::SetFilters(patch) => {
                state.filters = std::mem::take(&mut state.filters).merged(patch);
            }

            MaterialsAction::ClearSearchResults => {
                state.search_ids.clear();
                state.search_query.clear();
                state.collect_garbage();
            }

            MaterialsAction::ResetPagination => {
                state.pagination = Pagination::with_limit(state.pagination.limit);
            }

            MaterialsAction::SetCurrentMaterial(material) => {
                state.current_id = material.map(|material| {
                    // A live table entry has seen every mutation; a copy handed
                    // in by the caller may be an older snapshot.
                    if state.entities.contains(&material.id) {
                        material.id
                    } else {
                        state.entities.upsert(material)
                    }
                });
                state.collect_garbage();
            }

            MaterialsAction::ClearError => state.error = None,
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        BookmarkToggled, FiltersPatch, MaterialQuery, MaterialsPage, ProgressUpdated, SortBy,
    };
    use crate::entities::{Material, MaterialType};
    use crate::store::lifecycle::{Meta, RequestId};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn material(id: &str) -> Material {
        let now = Utc::now();
        Material {
            id: id.into(),
            title: format!("Material {id}"),
            description: String::new(),
            category_id: "c1".into(),
            material_type: MaterialType::Pdf,
            file_url: format!("https://files/{id}.pdf"),
            thumbnail_url: None,
            size: 1024,
            created_at: now,
            updated_at: now,
            tags: BTreeSet::new(),
            is_bookmarked: false,
            progress: 0,
            views: 10,
            downloads: 0,
        }
    }

    fn meta<A>(arg: A) -> Meta<A> {
        Meta::new(RequestId::new(1), arg)
    }

    fn page(ids: &[&str], page: u32, has_more: bool) -> MaterialsPage {
        MaterialsPage {
            materials: ids.iter().map(|id| material(id)).collect(),
            page,
            limit: 2,
            total: 5,
            has_more,
        }
    }

    fn fetch_page(state: MaterialsState, ids: &[&str], n: u32) -> MaterialsState {
        let query = MaterialQuery {
            category_id: None,
            page: n,
            limit: 2,
        };
        MaterialsReducer::reduce(
            state,
            MaterialsAction::FetchList(Lifecycle::Fulfilled(meta(query), page(ids, n, true))),
        )
    }

    fn ids(state: &MaterialsState) -> Vec<String> {
        state.materials().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn first_page_replaces_later_pages_append() {
        let state = fetch_page(MaterialsState::default(), &["a", "b"], 1);
        let state = fetch_page(state, &["c", "d"], 2);
        assert_eq!(ids(&state), ["a", "b", "c", "d"]);
        assert_eq!(state.pagination.page, 2);

        let state = fetch_page(state, &["x"], 1);
        assert_eq!(ids(&state), ["x"]);
        assert!(state.material("a").is_none(), "unreferenced entries are dropped");
    }

    #[test]
    fn fetch_list_lifecycle_flags() {
        let query = MaterialQuery::first_page(2);
        let state = MaterialsReducer::reduce(
            MaterialsState {
                error: Some("old".into()),
                ..MaterialsState::default()
            },
            MaterialsAction::FetchList(Lifecycle::Pending(meta(query.clone()))),
        );
        assert!(state.is_loading);
        assert_eq!(state.error, None);

        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::FetchList(Lifecycle::rejected(meta(query), "")),
        );
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("operation failed"));
    }

    #[test]
    fn search_uses_its_own_flag_and_region() {
        let state = fetch_page(MaterialsState::default(), &["a"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::Search(Lifecycle::Pending(meta("q".to_string()))),
        );
        assert!(state.is_searching);
        assert!(!state.is_loading);

        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::Search(Lifecycle::Fulfilled(meta("q".into()), page(&["s1"], 1, false))),
        );
        assert!(!state.is_searching);
        assert_eq!(ids(&state), ["a"]);
        let found: Vec<&str> = state.search_results().map(|m| m.id.as_str()).collect();
        assert_eq!(found, ["s1"]);
    }

    #[test]
    fn bookmark_reaches_list_current_and_search() {
        let state = fetch_page(MaterialsState::default(), &["a", "b"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::SetCurrentMaterial(Some(material("a"))),
        );
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::Search(Lifecycle::Fulfilled(meta("a".into()), page(&["a"], 1, false))),
        );
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::ToggleBookmark(Lifecycle::Fulfilled(
                meta("a".into()),
                BookmarkToggled { is_bookmarked: true },
            )),
        );

        assert!(state.materials().find(|m| m.id == "a").unwrap().is_bookmarked);
        assert!(state.current_material().unwrap().is_bookmarked);
        assert!(state.search_results().next().unwrap().is_bookmarked);
        assert!(!state.material("b").unwrap().is_bookmarked);
    }

    #[test]
    fn shelves_are_snapshots() {
        let state = fetch_page(MaterialsState::default(), &["a"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::FetchRecent(Lifecycle::Fulfilled(meta(10), vec![material("a")])),
        );
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::ToggleBookmark(Lifecycle::Fulfilled(
                meta("a".into()),
                BookmarkToggled { is_bookmarked: true },
            )),
        );
        assert!(state.material("a").unwrap().is_bookmarked);
        assert!(!state.recent_materials[0].is_bookmarked);
    }

    #[test]
    fn progress_and_views_only_after_fulfillment() {
        let state = fetch_page(MaterialsState::default(), &["m1"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::IncrementViews(Lifecycle::Pending(meta("m1".into()))),
        );
        assert_eq!(state.material("m1").unwrap().views, 10);

        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::IncrementViews(Lifecycle::Fulfilled(meta("m1".into()), ())),
        );
        assert_eq!(state.material("m1").unwrap().views, 11);

        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::UpdateProgress(Lifecycle::Fulfilled(
                meta("m1".into()),
                ProgressUpdated { progress: 55 },
            )),
        );
        assert_eq!(state.material("m1").unwrap().progress, 55);
    }

    #[test]
    fn view_rejection_is_swallowed() {
        let state = fetch_page(MaterialsState::default(), &["m1"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::IncrementViews(Lifecycle::rejected(meta("m1".into()), "offline")),
        );
        assert_eq!(state.error, None);
        assert_eq!(state.material("m1").unwrap().views, 10);
    }

    #[test]
    fn bookmark_rejection_surfaces_error() {
        let state = MaterialsReducer::reduce(
            MaterialsState::default(),
            MaterialsAction::ToggleBookmark(Lifecycle::rejected(meta("m1".into()), "denied")),
        );
        assert_eq!(state.error.as_deref(), Some("denied"));
    }

    #[test]
    fn set_current_keeps_live_copy() {
        let state = fetch_page(MaterialsState::default(), &["a"], 1);
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::ToggleBookmark(Lifecycle::Fulfilled(
                meta("a".into()),
                BookmarkToggled { is_bookmarked: true },
            )),
        );
        // Stale copy, e.g. from a shelf snapshot.
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::SetCurrentMaterial(Some(material("a"))),
        );
        assert!(state.current_material().unwrap().is_bookmarked);

        let state = MaterialsReducer::reduce(state, MaterialsAction::SetCurrentMaterial(None));
        assert!(state.current_material().is_none());
        assert!(state.material("a").is_some());
    }

    #[test]
    fn filters_merge_and_search_clear() {
        let state = MaterialsReducer::reduce(
            MaterialsState::default(),
            MaterialsAction::SetFilters(FiltersPatch {
                sort_by: Some(SortBy::Views),
                ..FiltersPatch::default()
            }),
        );
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::SetFilters(FiltersPatch {
                material_type: Some(Some(MaterialType::Video)),
                ..FiltersPatch::default()
            }),
        );
        assert_eq!(state.filters.sort_by, SortBy::Views);
        assert_eq!(state.filters.material_type, Some(MaterialType::Video));

        let state = MaterialsReducer::reduce(state, MaterialsAction::SetSearchQuery("rail".into()));
        let state = MaterialsReducer::reduce(
            state,
            MaterialsAction::Search(Lifecycle::Fulfilled(meta("rail".into()), page(&["s"], 1, false))),
        );
        let state = MaterialsReducer::reduce(state, MaterialsAction::ClearSearchResults);
        assert_eq!(state.search_results().count(), 0);
        assert!(state.search_query.is_empty());
        assert!(state.entities().is_empty());
    }

    #[test]
    fn next_page_and_reset() {
        let state = MaterialsState::with_page_size(2);
        assert_eq!(state.next_page_query().unwrap().page, 1);

        let state = fetch_page(state, &["a", "b"], 1);
        let next = state.next_page_query().unwrap();
        assert_eq!((next.page, next.limit), (2, 2));

        let state = MaterialsReducer::reduce(state, MaterialsAction::ResetPagination);
        assert_eq!(state.pagination, Pagination::with_limit(2));
    }

    #[test]
    fn no_next_page_when_exhausted() {
        let query = MaterialQuery::first_page(2).in_category("c1");
        let state = MaterialsReducer::reduce(
            MaterialsState::default(),
            MaterialsAction::FetchList(Lifecycle::Fulfilled(meta(query), page(&["a"], 1, false))),
        );
        assert_eq!(state.list_category(), Some("c1"));
        assert!(state.next_page_query().is_none());
    }
}
