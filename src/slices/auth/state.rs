use serde::Serialize;

use crate::entities::User;
use crate::store::mvi::SliceState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SliceState for AuthState {}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
