//! Async commands.
//!
//! A [`Thunk`] names one API operation and its arguments. The store turns it
//! into a `Pending` action, runs the call against the injected ports, and
//! dispatches the `Fulfilled` or `Rejected` settlement.

use thiserror::Error;

use crate::api::{ApiClients, ApiResult, MaterialQuery, SearchFilters};
use crate::slices::auth::AuthAction;
use crate::slices::banners::BannersAction;
use crate::slices::categories::CategoriesAction;
use crate::slices::materials::MaterialsAction;
use crate::slices::AppAction;

use super::lifecycle::{Lifecycle, Meta, RequestId, Stamped};

#[derive(Debug, Clone, PartialEq)]
pub enum Thunk {
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        name: String,
    },

    FetchCategories,
    RefreshCategories,
    SearchCategories(String),

    FetchMaterials(MaterialQuery),
    FetchMaterial(String),
    SearchMaterials {
        query: String,
        filters: SearchFilters,
    },
    FetchRecentMaterials(u32),
    FetchPopularMaterials(u32),
    FetchBookmarkedMaterials,
    ToggleBookmark(String),
    UpdateProgress {
        id: String,
        progress: u8,
    },
    IncrementViews(String),

    FetchBanners,
    TrackBannerImpression(String),
    TrackBannerClick(String),
}

const CATEGORY_COLLECTION_FENCE: &str = "categories/collection";

/// Ordering rule for settlements of one operation.
///
/// A settlement is stale when a superseding request under the same key was
/// issued after it. Only requests with `supersedes` advance the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub key: &'static str,
    pub supersedes: bool,
}

/// Why an awaited thunk did not fulfil.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThunkError {
    #[error("{operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    /// Dropped because a newer request for the same operation was issued.
    #[error("{operation} superseded by a newer request")]
    Superseded { operation: &'static str },

    #[error("{operation} not applied: store is shut down")]
    ShutDown { operation: &'static str },
}

impl ThunkError {
    pub fn operation(&self) -> &'static str {
        match self {
            ThunkError::Rejected { operation, .. }
            | ThunkError::Superseded { operation }
            | ThunkError::ShutDown { operation } => operation,
        }
    }

    /// The rejection reason, as stored in the slice.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ThunkError::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Result of running a thunk: the action to dispatch and, for rejections,
/// the reason that went into it.
pub(crate) struct Settlement {
    pub action: AppAction,
    pub rejection: Option<String>,
}

impl Thunk {
    pub fn operation(&self) -> &'static str {
        match self {
            Thunk::Login { .. } => "auth/login",
            Thunk::Register { .. } => "auth/register",
            Thunk::FetchCategories => "categories/fetchCategories",
            Thunk::RefreshCategories => "categories/refreshCategories",
            Thunk::SearchCategories(_) => "categories/searchCategories",
            Thunk::FetchMaterials(_) => "materials/fetchMaterials",
            Thunk::FetchMaterial(_) => "materials/fetchMaterial",
            Thunk::SearchMaterials { .. } => "materials/searchMaterials",
            Thunk::FetchRecentMaterials(_) => "materials/fetchRecentMaterials",
            Thunk::FetchPopularMaterials(_) => "materials/fetchPopularMaterials",
            Thunk::FetchBookmarkedMaterials => "materials/fetchBookmarkedMaterials",
            Thunk::ToggleBookmark(_) => "materials/toggleBookmark",
            Thunk::UpdateProgress { .. } => "materials/updateProgress",
            Thunk::IncrementViews(_) => "materials/incrementViews",
            Thunk::FetchBanners => "banners/fetchBanners",
            Thunk::TrackBannerImpression(_) => "banners/trackImpression",
            Thunk::TrackBannerClick(_) => "banners/trackClick",
        }
    }

    /// Fence for replace-style reads. Mutations and tracking are never
    /// fenced: every one of them must reach the reducer.
    ///
    /// Fetch and search of categories overwrite the same vector and raise
    /// the same `is_loading` flag, so they share one key. Refresh stays on
    /// its own key: it owns `is_refreshing`, and dropping its settlement
    /// for a newer fetch would leave that flag raised. A refresh racing a
    /// search is therefore still settled in arrival order.
    pub fn fence(&self) -> Option<Fence> {
        let supersedes = match self {
            // Appending a page must not invalidate the page before it.
            Thunk::FetchMaterials(query) => query.is_first_page(),
            Thunk::FetchCategories
            | Thunk::RefreshCategories
            | Thunk::SearchCategories(_)
            | Thunk::FetchMaterial(_)
            | Thunk::SearchMaterials { .. }
            | Thunk::FetchRecentMaterials(_)
            | Thunk::FetchPopularMaterials(_)
            | Thunk::FetchBookmarkedMaterials
            | Thunk::FetchBanners => true,
            Thunk::Login { .. }
            | Thunk::Register { .. }
            | Thunk::ToggleBookmark(_)
            | Thunk::UpdateProgress { .. }
            | Thunk::IncrementViews(_)
            | Thunk::TrackBannerImpression(_)
            | Thunk::TrackBannerClick(_) => return None,
        };
        let key = match self {
            Thunk::FetchCategories | Thunk::SearchCategories(_) => CATEGORY_COLLECTION_FENCE,
            _ => self.operation(),
        };
        Some(Fence { key, supersedes })
    }

    /// The action announcing that `request` was issued.
    pub(crate) fn pending(&self, request: RequestId) -> AppAction {
        match self {
            Thunk::Login { .. } => AuthAction::Login(Lifecycle::Pending(Meta::new(request, ()))).into(),
            Thunk::Register { .. } => {
                AuthAction::Register(Lifecycle::Pending(Meta::new(request, ()))).into()
            }
            Thunk::FetchCategories => {
                CategoriesAction::Fetch(Lifecycle::Pending(Meta::new(request, ()))).into()
            }
            Thunk::RefreshCategories => {
                CategoriesAction::Refresh(Lifecycle::Pending(Meta::new(request, ()))).into()
            }
            Thunk::SearchCategories(query) => {
                CategoriesAction::Search(Lifecycle::Pending(Meta::new(request, query.clone())))
                    .into()
            }
            Thunk::FetchMaterials(query) => {
                MaterialsAction::FetchList(Lifecycle::Pending(Meta::new(request, query.clone())))
                    .into()
            }
            Thunk::FetchMaterial(id) => {
                MaterialsAction::FetchOne(Lifecycle::Pending(Meta::new(request, id.clone()))).into()
            }
            Thunk::SearchMaterials { query, .. } => {
                MaterialsAction::Search(Lifecycle::Pending(Meta::new(request, query.clone())))
                    .into()
            }
            Thunk::FetchRecentMaterials(limit) => {
                MaterialsAction::FetchRecent(Lifecycle::Pending(Meta::new(request, *limit))).into()
            }
            Thunk::FetchPopularMaterials(limit) => {
                MaterialsAction::FetchPopular(Lifecycle::Pending(Meta::new(request, *limit))).into()
            }
            Thunk::FetchBookmarkedMaterials => {
                MaterialsAction::FetchBookmarked(Lifecycle::Pending(Meta::new(request, ()))).into()
            }
            Thunk::ToggleBookmark(id) => {
                MaterialsAction::ToggleBookmark(Lifecycle::Pending(Meta::new(request, id.clone())))
                    .into()
            }
            Thunk::UpdateProgress { id, .. } => {
                MaterialsAction::UpdateProgress(Lifecycle::Pending(Meta::new(request, id.clone())))
                    .into()
            }
            Thunk::IncrementViews(id) => {
                MaterialsAction::IncrementViews(Lifecycle::Pending(Meta::new(request, id.clone())))
                    .into()
            }
            Thunk::FetchBanners => {
                BannersAction::Fetch(Lifecycle::Pending(Meta::new(request, ()))).into()
            }
            Thunk::TrackBannerImpression(id) => {
                BannersAction::TrackImpression(Lifecycle::Pending(Meta::new(request, id.clone())))
                    .into()
            }
            Thunk::TrackBannerClick(id) => {
                BannersAction::TrackClick(Lifecycle::Pending(Meta::new(request, id.clone()))).into()
            }
        }
    }

    /// Run the API call and build its settlement action.
    pub(crate) async fn execute(self, api: &ApiClients, request: RequestId) -> Settlement {
        match self {
            Thunk::Login { email, password } => settle(
                Meta::new(request, ()),
                api.auth.login(&email, &password).await,
                AuthAction::Login,
            ),
            Thunk::Register {
                email,
                password,
                name,
            } => settle(
                Meta::new(request, ()),
                api.auth.register(&email, &password, &name).await,
                AuthAction::Register,
            ),
            Thunk::FetchCategories => settle(
                Meta::new(request, ()),
                api.categories.get_categories().await.map(Stamped::now),
                CategoriesAction::Fetch,
            ),
            Thunk::RefreshCategories => settle(
                Meta::new(request, ()),
                api.categories.get_categories().await.map(Stamped::now),
                CategoriesAction::Refresh,
            ),
            Thunk::SearchCategories(query) => {
                let result = api.categories.search_categories(&query).await;
                settle(Meta::new(request, query), result, CategoriesAction::Search)
            }
            Thunk::FetchMaterials(query) => {
                let result = api.materials.get_materials(&query).await;
                settle(Meta::new(request, query), result, MaterialsAction::FetchList)
            }
            Thunk::FetchMaterial(id) => {
                let result = api.materials.get_material(&id).await;
                settle(Meta::new(request, id), result, MaterialsAction::FetchOne)
            }
            Thunk::SearchMaterials { query, filters } => {
                let result = api.materials.search_materials(&query, &filters).await;
                settle(Meta::new(request, query), result, MaterialsAction::Search)
            }
            Thunk::FetchRecentMaterials(limit) => settle(
                Meta::new(request, limit),
                api.materials.get_recent_materials(limit).await,
                MaterialsAction::FetchRecent,
            ),
            Thunk::FetchPopularMaterials(limit) => settle(
                Meta::new(request, limit),
                api.materials.get_popular_materials(limit).await,
                MaterialsAction::FetchPopular,
            ),
            Thunk::FetchBookmarkedMaterials => settle(
                Meta::new(request, ()),
                api.materials.get_bookmarked_materials().await,
                MaterialsAction::FetchBookmarked,
            ),
            Thunk::ToggleBookmark(id) => {
                let result = api.materials.toggle_bookmark(&id).await;
                settle(Meta::new(request, id), result, MaterialsAction::ToggleBookmark)
            }
            Thunk::UpdateProgress { id, progress } => {
                let result = api.materials.update_progress(&id, progress).await;
                settle(Meta::new(request, id), result, MaterialsAction::UpdateProgress)
            }
            Thunk::IncrementViews(id) => {
                let result = api.materials.increment_views(&id).await;
                settle(Meta::new(request, id), result, MaterialsAction::IncrementViews)
            }
            Thunk::FetchBanners => settle(
                Meta::new(request, ()),
                api.banners.get_banners().await.map(Stamped::now),
                BannersAction::Fetch,
            ),
            Thunk::TrackBannerImpression(id) => {
                let result = api.banners.track_impression(&id).await;
                settle(Meta::new(request, id), result, BannersAction::TrackImpression)
            }
            Thunk::TrackBannerClick(id) => {
                let result = api.banners.track_click(&id).await;
                settle(Meta::new(request, id), result, BannersAction::TrackClick)
            }
        }
    }
}

fn settle<T, A, S>(meta: Meta<A>, result: ApiResult<T>, wrap: impl FnOnce(Lifecycle<T, A>) -> S) -> Settlement
where
    S: Into<AppAction>,
{
    let lifecycle = match result {
        Ok(value) => Lifecycle::Fulfilled(meta, value),
        Err(err) => Lifecycle::rejected(meta, err.to_string()),
    };
    let rejection = match &lifecycle {
        Lifecycle::Rejected(_, reason) => Some(reason.clone()),
        _ => None,
    };
    Settlement {
        action: wrap(lifecycle).into(),
        rejection,
    }
}
