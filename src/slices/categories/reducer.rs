use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Reducer;

use super::action::CategoriesAction;
use super::state::CategoriesState;

pub struct CategoriesReducer;

impl Reducer for CategoriesReducer {
    type State = CategoriesState;
    type Action = CategoriesAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            CategoriesAction::Fetch(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading, &mut state.error);
                if let Lifecycle::Fulfilled(_, fetched) = lifecycle {
                    state.categories = fetched.value;
                    state.last_updated = Some(fetched.at);
                }
            }
            CategoriesAction::Refresh(lifecycle) => {
                lifecycle.apply_status(&mut state.is_refreshing, &mut state.error);
                if let Lifecycle::Fulfilled(_, fetched) = lifecycle {
                    state.categories = fetched.value;
                    state.last_updated = Some(fetched.at);
                }
            }
            CategoriesAction::Search(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading, &mut state.error);
                if let Lifecycle::Fulfilled(_, found) = lifecycle {
                    state.categories = found;
                }
            }
            CategoriesAction::UpdateCount { id, count } => {
                if let Some(category) = state.categories.iter_mut().find(|c| c.id == id) {
                    category.count = count;
                }
            }
            CategoriesAction::ClearError => state.error = None,
        }
        state
    }
}
