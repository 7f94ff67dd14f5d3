//! Reducer trait for slices.

use super::action::Action;
use super::state::SliceState;

/// The only place a slice's state changes.
///
/// `(State, Action) -> State`, with no I/O. Anything that depends on the
/// clock is carried inside the action.
pub trait Reducer {
    type State: SliceState;

    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
