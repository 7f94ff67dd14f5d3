use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Banner;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannersState {
    pub banners: Vec<Banner>,
    /// Banners that passed the activity filter the last time it ran.
    /// Not live: a window that lapses stays here until the next recompute.
    pub active_banners: Vec<Banner>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SliceState for BannersState {}

impl BannersState {
    pub fn get(&self, id: &str) -> Option<&Banner> {
        self.banners.iter().find(|b| b.id == id)
    }

    pub(super) fn recompute_active(&mut self, now: DateTime<Utc>) {
        self.active_banners = self
            .banners
            .iter()
            .filter(|b| b.is_active_at(now))
            .cloned()
            .collect();
    }

    /// Apply `f` to the banner in both collections.
    pub(super) fn patch(&mut self, id: &str, f: impl Fn(&mut Banner)) {
        self.banners
            .iter_mut()
            .chain(self.active_banners.iter_mut())
            .filter(|b| b.id == id)
            .for_each(f);
    }
}
