use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::entities::Material;

/// Materials keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MaterialTable {
    entities: BTreeMap<String, Material>,
}

impl MaterialTable {
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Insert or overwrite with a server copy; returns the id.
    pub(super) fn upsert(&mut self, material: Material) -> String {
        let id = material.id.clone();
        self.entities.insert(id.clone(), material);
        id
    }

    pub(super) fn upsert_all(&mut self, materials: Vec<Material>) -> Vec<String> {
        materials.into_iter().map(|m| self.upsert(m)).collect()
    }

    /// Apply `f` to the stored material. Returns false if the id is unknown.
    pub(super) fn patch(&mut self, id: &str, f: impl FnOnce(&mut Material)) -> bool {
        match self.entities.get_mut(id) {
            Some(material) => {
                f(material);
                true
            }
            None => false,
        }
    }

    /// Drop every entry whose id is not in `referenced`.
    pub(super) fn retain_referenced(&mut self, referenced: &HashSet<&str>) {
        self.entities.retain(|id, _| referenced.contains(id.as_str()));
    }
}
