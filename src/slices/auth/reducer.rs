use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Reducer;

use super::action::AuthAction;
use super::state::AuthState;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            // Login and register settle the same way. A rejection leaves any
            // previously loaded user in place; a fulfilment wipes any reason an
            // overlapping attempt left behind.
            AuthAction::Login(lifecycle) | AuthAction::Register(lifecycle) => {
                lifecycle.apply_status(&mut state.is_loading, &mut state.error);
                if let Lifecycle::Fulfilled(_, user) = lifecycle {
                    state.user = Some(user);
                    state.error = None;
                }
            }
            AuthAction::SignOut => state.user = None,
            AuthAction::ClearError => state.error = None,
        }
        state
    }
}
