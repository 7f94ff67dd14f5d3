//! Authentication slice: the signed-in user and the login/register
//! request lifecycles.

mod action;
mod reducer;
mod state;
mod validation;

pub use action::AuthAction;
pub use reducer::AuthReducer;
pub use state::AuthState;
pub use validation::{Credentials, Registration, ValidationError, MIN_PASSWORD_LEN};
