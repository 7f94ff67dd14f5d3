use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Category;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error: Option<String>,
    /// When the full collection was last received from the server.
    pub last_updated: Option<DateTime<Utc>>,
}

impl SliceState for CategoriesState {}

impl CategoriesState {
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}
