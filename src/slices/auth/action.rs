use crate::entities::User;
use crate::store::lifecycle::Lifecycle;
use crate::store::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(Lifecycle<User>),
    Register(Lifecycle<User>),
    /// Local sign-out. No request is made.
    SignOut,
    ClearError,
}

impl Action for AuthAction {}
