use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::mvi::SliceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode '{}'", other)),
        }
    }
}

/// Full color palette. Always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

pub const LIGHT_PALETTE: Palette = Palette {
    primary: "#2563eb",
    background: "#ffffff",
    text: "#0f172a",
    text_secondary: "#64748b",
    border: "#e2e8f0",
};

pub const DARK_PALETTE: Palette = Palette {
    primary: "#3b82f6",
    background: "#0f172a",
    text: "#f8fafc",
    text_secondary: "#94a3b8",
    border: "#334155",
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => LIGHT_PALETTE,
            ThemeMode::Dark => DARK_PALETTE,
        }
    }
}

/// Theme state.
///
/// Fields are private so `mode`, `is_dark` and `colors` can only change
/// together, through [`ThemeState::for_mode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    mode: ThemeMode,
    is_dark: bool,
    colors: Palette,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::for_mode(ThemeMode::Light)
    }
}

impl SliceState for ThemeState {}

impl ThemeState {
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            mode,
            is_dark: mode == ThemeMode::Dark,
            colors: Palette::for_mode(mode),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn colors(&self) -> &Palette {
        &self.colors
    }
}
