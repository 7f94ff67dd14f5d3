use crate::store::mvi::Reducer;

use super::action::ThemeAction;
use super::state::ThemeState;

pub struct ThemeReducer;

impl Reducer for ThemeReducer {
    type State = ThemeState;
    type Action = ThemeAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            ThemeAction::SetMode(mode) => ThemeState::for_mode(mode),
            ThemeAction::Toggle => ThemeState::for_mode(state.mode().flipped()),
        }
    }
}
