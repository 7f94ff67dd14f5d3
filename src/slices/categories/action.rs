use crate::entities::Category;
use crate::store::lifecycle::{Lifecycle, Stamped};
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesAction {
    Fetch(Lifecycle<Stamped<Vec<Category>>>),
    /// Pull-to-refresh. Same effect as `Fetch` behind its own flag.
    Refresh(Lifecycle<Stamped<Vec<Category>>>),
    /// Overwrites the displayed collection with the matches for the query.
    Search(Lifecycle<Vec<Category>, String>),
    /// Local override of a category's material count until the next fetch.
    UpdateCount { id: String, count: u32 },
    ClearError,
}

impl Action for CategoriesAction {}
