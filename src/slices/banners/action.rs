use chrono::{DateTime, Utc};

use crate::entities::Banner;
use crate::store::lifecycle::{Lifecycle, Stamped};
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum BannersAction {
    /// The stamp is the instant the active filter is evaluated at.
    Fetch(Lifecycle<Stamped<Vec<Banner>>>),
    TrackImpression(Lifecycle<(), String>),
    TrackClick(Lifecycle<(), String>),
    /// Re-evaluate date windows without fetching.
    UpdateActive { now: DateTime<Utc> },
    ClearError,
}

impl Action for BannersAction {}
