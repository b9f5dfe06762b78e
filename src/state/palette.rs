//! Static light and dark color palettes.

use serde::Serialize;

/// Colors used by the UI for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub primary: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub danger: &'static str,
}

pub const COLORS_LIGHT: Palette = Palette {
    background: "#F5F5F7",
    surface: "#FFFFFF",
    primary: "#4A6CF7",
    text: "#1C1C1E",
    text_secondary: "#6E6E73",
    border: "#D1D1D6",
    success: "#34C759",
    danger: "#FF3B30",
};

pub const COLORS_DARK: Palette = Palette {
    background: "#000000",
    surface: "#1C1C1E",
    primary: "#6E8BFF",
    text: "#F2F2F7",
    text_secondary: "#AEAEB2",
    border: "#38383A",
    success: "#30D158",
    danger: "#FF453A",
};

pub fn palette_for(is_dark: bool) -> &'static Palette {
    if is_dark { &COLORS_DARK } else { &COLORS_LIGHT }
}
