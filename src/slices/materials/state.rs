use std::collections::HashSet;

use serde::Serialize;

use crate::api::{MaterialQuery, SearchFilters};
use crate::entities::Material;
use crate::store::mvi::SliceState;

use super::table::MaterialTable;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Server pagination cursor of the general list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            has_more: true,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsState {
    pub(super) entities: MaterialTable,
    /// Ids of the paged list, in display order.
    #[serde(rename = "materials")]
    pub(super) list: Vec<String>,
    /// Category the paged list was loaded for.
    pub(super) list_category: Option<String>,
    #[serde(rename = "searchResults")]
    pub(super) search_ids: Vec<String>,
    #[serde(rename = "currentMaterial")]
    pub(super) current_id: Option<String>,

    pub recent_materials: Vec<Material>,
    pub popular_materials: Vec<Material>,
    pub bookmarked_materials: Vec<Material>,

    pub is_loading: bool,
    pub is_searching: bool,
    pub is_loading_current: bool,
    pub is_loading_recent: bool,
    pub is_loading_popular: bool,
    pub is_loading_bookmarked: bool,
    pub error: Option<String>,

    pub search_query: String,
    pub filters: SearchFilters,
    pub pagination: Pagination,
}

impl SliceState for MaterialsState {}

impl MaterialsState {
    /// Empty state whose pagination uses `page_size`.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            pagination: Pagination::with_limit(page_size),
            ..Self::default()
        }
    }

    /// The paged list, in display order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> + '_ {
        self.resolve(&self.list)
    }

    pub fn material_count(&self) -> usize {
        self.list.len()
    }

    pub fn search_results(&self) -> impl Iterator<Item = &Material> + '_ {
        self.resolve(&self.search_ids)
    }

    pub fn current_material(&self) -> Option<&Material> {
        self.current_id.as_deref().and_then(|id| self.entities.get(id))
    }

    /// The live copy of a material held by any of the list, the search
    /// results or the current pointer.
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.entities.get(id)
    }

    pub fn entities(&self) -> &MaterialTable {
        &self.entities
    }

    /// Category the list was last loaded for, if any.
    pub fn list_category(&self) -> Option<&str> {
        self.list_category.as_deref()
    }

    /// Query for the next page of the list, or `None` when the server said
    /// there is nothing more. An empty list asks for the first page.
    pub fn next_page_query(&self) -> Option<MaterialQuery> {
        if !self.pagination.has_more {
            return None;
        }
        let page = if self.list.is_empty() {
            1
        } else {
            self.pagination.page + 1
        };
        Some(MaterialQuery {
            category_id: self.list_category.clone(),
            page,
            limit: self.pagination.limit,
        })
    }

    fn resolve<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a Material> + 'a {
        ids.iter().filter_map(move |id| self.entities.get(id))
    }

    /// Forget table entries no live view points at.
    pub(super) fn collect_garbage(&mut self) {
        let referenced: HashSet<&str> = self
            .list
            .iter()
            .chain(self.search_ids.iter())
            .chain(self.current_id.iter())
            .map(String::as_str)
            .collect();
        self.entities.retain_referenced(&referenced);
    }
}
