//! The whole state tree and the reducer that routes actions to slices.

use serde::Serialize;

use crate::config::Config;
use crate::store::mvi::{Action, Reducer, SliceState};

use super::auth::{AuthAction, AuthReducer, AuthState};
use super::banners::{BannersAction, BannersReducer, BannersState};
use super::categories::{CategoriesAction, CategoriesReducer, CategoriesState};
use super::downloads::{DownloadsAction, DownloadsReducer, DownloadsState};
use super::materials::{MaterialsAction, MaterialsReducer, MaterialsState};
use super::theme::{ThemeAction, ThemeReducer, ThemeState};

/// Snapshot of every slice. Subscribers receive it after each dispatch.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    pub theme: ThemeState,
    pub categories: CategoriesState,
    pub materials: MaterialsState,
    pub downloads: DownloadsState,
    pub banners: BannersState,
}

impl SliceState for AppState {}

impl AppState {
    /// Initial tree for a store built from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            theme: ThemeState::for_mode(config.store.initial_theme),
            materials: MaterialsState::with_page_size(config.materials.page_size),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Auth(AuthAction),
    Theme(ThemeAction),
    Categories(CategoriesAction),
    Materials(MaterialsAction),
    Downloads(DownloadsAction),
    Banners(BannersAction),
}

impl Action for AppAction {}

impl AppAction {
    /// Slice the action is routed to, for logging.
    pub fn slice(&self) -> &'static str {
        match self {
            AppAction::Auth(_) => "auth",
            AppAction::Theme(_) => "theme",
            AppAction::Categories(_) => "categories",
            AppAction::Materials(_) => "materials",
            AppAction::Downloads(_) => "downloads",
            AppAction::Banners(_) => "banners",
        }
    }
}

macro_rules! impl_from_slice_action {
    ($($variant:ident($action:ty)),* $(,)?) => {
        $(
            impl From<$action> for AppAction {
                fn from(action: $action) -> Self {
                    AppAction::$variant(action)
                }
            }
        )*
    };
}

impl_from_slice_action!(
    Auth(AuthAction),
    Theme(ThemeAction),
    Categories(CategoriesAction),
    Materials(MaterialsAction),
    Downloads(DownloadsAction),
    Banners(BannersAction),
);

/// Runs one slice reducer over its field and puts the result back.
macro_rules! reduce_slice {
    ($state:expr, $field:ident, $reducer:ty, $action:expr) => {
        $state.$field = <$reducer>::reduce(std::mem::take(&mut $state.$field), $action)
    };
}

pub struct RootReducer;

impl Reducer for RootReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match action {
            AppAction::Auth(action) => reduce_slice!(state, auth, AuthReducer, action),
            AppAction::Theme(action) => reduce_slice!(state, theme, ThemeReducer, action),
            AppAction::Categories(action) => {
                reduce_slice!(state, categories, CategoriesReducer, action)
            }
            AppAction::Materials(action) => {
                reduce_slice!(state, materials, MaterialsReducer, action)
            }
            AppAction::Downloads(action) => {
                reduce_slice!(state, downloads, DownloadsReducer, action)
            }
            AppAction::Banners(action) => reduce_slice!(state, banners, BannersReducer, action),
        }
        state
    }
}
