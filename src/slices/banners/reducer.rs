use tracing::debug;

use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Reducer;

use super::action::BannersAction;
use super::state::BannersState;

pub struct BannersReducer;

impl Reducer for BannersReducer {
    type State = BannersState;
    type Action = BannersAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            BannersAction::Fetch(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading, &mut state.error);
                if let Lifecycle::Fulfilled(_, fetched) = lifecycle {
                    state.banners = fetched.value;
                    state.recompute_active(fetched.at);
                }
            }
            BannersAction::TrackImpression(lifecycle) => match lifecycle {
                Lifecycle::Fulfilled(meta, ()) => {
                    state.patch(&meta.arg, |b| b.impression_count += 1);
                }
                Lifecycle::Rejected(meta, reason) => {
                    debug!(banner = %meta.arg, %reason, "impression not recorded");
                }
                Lifecycle::Pending(_) => {}
            },
            BannersAction::TrackClick(lifecycle) => match lifecycle {
                Lifecycle::Fulfilled(meta, ()) => {
                    state.patch(&meta.arg, |b| b.click_count += 1);
                }
                Lifecycle::Rejected(meta, reason) => {
                    debug!(banner = %meta.arg, %reason, "click not recorded");
                }
                Lifecycle::Pending(_) => {}
            },
            BannersAction::UpdateActive { now } => state.recompute_active(now),
            BannersAction::ClearError => state.error = None,
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Banner, BannerPriority, BannerVariant};
    use crate::store::lifecycle::{Meta, RequestId, Stamped};
    use chrono::{Duration, Utc};

    fn banner(id: &str, is_active: bool) -> Banner {
        let now = Utc::now();
        Banner {
            id: id.into(),
            title: id.to_uppercase(),
            subtitle: None,
            description: None,
            image_url: None,
            gradient_colors: vec!["#000".into(), "#fff".into()],
            button_text: None,
            button_icon: None,
            variant: BannerVariant::Gradient,
            priority: BannerPriority::Medium,
            is_active,
            start_date: None,
            end_date: None,
            target_audience: Vec::new(),
            click_count: 0,
            impression_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn fetched(banners: Vec<Banner>) -> BannersAction {
        let meta = Meta::new(RequestId::new(1), ());
        BannersAction::Fetch(Lifecycle::Fulfilled(meta, Stamped::now(banners)))
    }

    fn tracked(id: &str) -> Meta<String> {
        Meta::new(RequestId::new(2), id.to_string())
    }

    #[test]
    fn fetch_filters_inactive() {
        let banners = vec![
            banner("a", true),
            banner("b", true),
            banner("c", false),
            banner("d", true),
        ];
        let state = BannersReducer::reduce(BannersState::default(), fetched(banners));
        assert_eq!(state.banners.len(), 4);
        assert_eq!(state.active_banners.len(), 3);
        assert!(!state.is_loading);
    }

    #[test]
    fn future_start_waits_for_recompute() {
        let mut future = banner("f", true);
        future.start_date = Some(Utc::now() + Duration::hours(1));
        let state = BannersReducer::reduce(BannersState::default(), fetched(vec![future]));
        assert!(state.active_banners.is_empty());

        let later = Utc::now() + Duration::hours(2);
        let state = BannersReducer::reduce(state, BannersAction::UpdateActive { now: later });
        assert_eq!(state.active_banners.len(), 1);
    }

    #[test]
    fn lapsed_window_stays_until_recompute() {
        let mut closing = banner("c", true);
        closing.end_date = Some(Utc::now() + Duration::minutes(5));
        let state = BannersReducer::reduce(BannersState::default(), fetched(vec![closing]));
        assert_eq!(state.active_banners.len(), 1);

        let now = Utc::now() + Duration::hours(1);
        let state = BannersReducer::reduce(state, BannersAction::UpdateActive { now });
        assert!(state.active_banners.is_empty());
        assert_eq!(state.banners.len(), 1);
    }

    #[test]
    fn tracking_counts_on_fulfillment_only() {
        let state = BannersReducer::reduce(BannersState::default(), fetched(vec![banner("a", true)]));
        let state = BannersReducer::reduce(
            state,
            BannersAction::TrackImpression(Lifecycle::Pending(tracked("a"))),
        );
        assert_eq!(state.get("a").unwrap().impression_count, 0);

        let state = BannersReducer::reduce(
            state,
            BannersAction::TrackImpression(Lifecycle::Fulfilled(tracked("a"), ())),
        );
        let state = BannersReducer::reduce(
            state,
            BannersAction::TrackClick(Lifecycle::Fulfilled(tracked("a"), ())),
        );
        assert_eq!(state.get("a").unwrap().impression_count, 1);
        assert_eq!(state.get("a").unwrap().click_count, 1);
        assert_eq!(state.active_banners[0].click_count, 1);
    }

    #[test]
    fn tracking_rejection_is_silent() {
        let state = BannersReducer::reduce(BannersState::default(), fetched(vec![banner("a", true)]));
        let next = BannersReducer::reduce(
            state.clone(),
            BannersAction::TrackClick(Lifecycle::rejected(tracked("a"), "offline")),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn fetch_rejection_keeps_banners() {
        let state = BannersReducer::reduce(BannersState::default(), fetched(vec![banner("a", true)]));
        let meta = Meta::new(RequestId::new(3), ());
        let state = BannersReducer::reduce(
            state,
            BannersAction::Fetch(Lifecycle::rejected(meta, "Failed to fetch banners")),
        );
        assert_eq!(state.banners.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch banners"));

        let state = BannersReducer::reduce(state, BannersAction::ClearError);
        assert_eq!(state.error, None);
    }
}
