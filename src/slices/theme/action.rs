use crate::store::mvi::Action;

use super::state::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    SetMode(ThemeMode),
    Toggle,
}

impl Action for ThemeAction {}
