use serde::{Deserialize, Serialize};

/// A material category as shown on the home grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Icon name understood by the UI layer.
    pub icon: String,
    /// Number of materials in the category. May be patched locally.
    pub count: u32,
    pub color: String,
    pub path: String,
}
