//! Request and response shapes shared by the API ports and the store.

use serde::{Deserialize, Serialize};

use crate::entities::{Material, MaterialType};

/// Arguments of a paged material list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl MaterialQuery {
    pub fn first_page(limit: u32) -> Self {
        Self {
            category_id: None,
            page: 1,
            limit,
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Pages at or below 1 replace the list; later pages append.
    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }
}

/// One page of materials plus the server's pagination cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsPage {
    pub materials: Vec<Material>,
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Title,
    Views,
    Downloads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search filters. Also the materials slice's persisted filter state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<MaterialType>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl SearchFilters {
    /// Shallow merge: only fields present in `patch` are replaced.
    pub fn merged(mut self, patch: FiltersPatch) -> Self {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(material_type) = patch.material_type {
            self.material_type = material_type;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        self
    }
}

/// Partial update for [`SearchFilters`].
///
/// The outer `Option` means "leave unchanged"; `Some(None)` clears a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FiltersPatch {
    pub category: Option<Option<String>>,
    pub material_type: Option<Option<MaterialType>>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkToggled {
    pub is_bookmarked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdated {
    pub progress: u8,
}
