use crate::api::{BookmarkToggled, FiltersPatch, MaterialQuery, MaterialsPage, ProgressUpdated};
use crate::entities::Material;
use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialsAction {
    /// Paged list. The first page replaces the list, later pages append.
    FetchList(Lifecycle<MaterialsPage, MaterialQuery>),
    /// Detail fetch for the current material. Argument is the id.
    FetchOne(Lifecycle<Material, String>),
    /// Search. Argument is the query text.
    Search(Lifecycle<MaterialsPage, String>),
    FetchRecent(Lifecycle<Vec<Material>, u32>),
    FetchPopular(Lifecycle<Vec<Material>, u32>),
    FetchBookmarked(Lifecycle<Vec<Material>>),
    ToggleBookmark(Lifecycle<BookmarkToggled, String>),
    UpdateProgress(Lifecycle<ProgressUpdated, String>),
    /// Fire-and-forget view count. Rejections are swallowed.
    IncrementViews(Lifecycle<(), String>),

    SetSearchQuery(String),
    SetFilters(FiltersPatch),
    /// Clears both the results and the query.
    ClearSearchResults,
    ResetPagination,
    /// Set the current material from data the caller already holds.
    SetCurrentMaterial(Option<Material>),
    ClearError,
}

impl Action for MaterialsAction {}
