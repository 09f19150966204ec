use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_search: ColorSpec,
    pub footer_log: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        let blue = rgb(125, 207, 255);
        Theme {
            name: "tokyo-night".to_string(),
            primary: blue,
            accent: rgb(255, 159, 196),
            text: rgb(169, 177, 214),
            text_muted: rgb(117, 121, 148),
            success: rgb(158, 206, 106),
            warning: rgb(255, 202, 40),
            error: rgb(247, 118, 142),
            border_active: blue,
            border_normal: rgb(117, 121, 148),
            highlight_bg: blue,
            highlight_fg: rgb(26, 27, 38),
            footer_search: blue,
            footer_log: rgb(158, 206, 106),
            footer_normal: rgb(0, 0, 0),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        let purple = rgb(161, 119, 255);
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: purple,
            accent: rgb(255, 109, 146),
            text: rgb(88, 82, 96),
            text_muted: rgb(152, 147, 165),
            success: rgb(59, 247, 209),
            warning: rgb(234, 157, 52),
            error: rgb(180, 99, 122),
            border_active: purple,
            border_normal: rgb(152, 147, 165),
            highlight_bg: purple,
            highlight_fg: rgb(250, 244, 237),
            footer_search: purple,
            footer_log: rgb(59, 247, 209),
            footer_normal: rgb(0, 0, 0),
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        let mauve = rgb(203, 166, 247);
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: mauve,
            accent: rgb(250, 179, 135),
            text: rgb(205, 214, 244),
            text_muted: rgb(127, 132, 156),
            success: rgb(166, 227, 161),
            warning: rgb(249, 226, 175),
            error: rgb(243, 139, 168),
            border_active: mauve,
            border_normal: rgb(127, 132, 156),
            highlight_bg: mauve,
            highlight_fg: rgb(30, 30, 46),
            footer_search: mauve,
            footer_log: rgb(166, 227, 161),
            footer_normal: rgb(0, 0, 0),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "catppuccin-mocha".to_string(),
        ]
    }
}
