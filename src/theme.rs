use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;

/// Colors used by the renderer. Built once at startup.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub header_fg: Color,
    pub text_fg: Color,
    pub user_fg: Color,
    pub assistant_fg: Color,
    pub info_fg: Color,
    pub error_fg: Color,
    pub status_fg: Color,
    pub spinner_fg: Color,
    pub selection_fg: Color,
    pub border_fg: Color,
    pub input_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            header_fg: Color::Rgb(118, 215, 196),
            text_fg: Color::Rgb(225, 225, 225),
            user_fg: Color::Rgb(93, 173, 226),
            assistant_fg: Color::Rgb(247, 220, 111),
            info_fg: Color::Rgb(170, 183, 184),
            error_fg: Color::Rgb(231, 76, 60),
            status_fg: Color::Rgb(133, 146, 158),
            spinner_fg: Color::Rgb(250, 208, 46),
            selection_fg: Color::Rgb(196, 114, 218),
            border_fg: Color::Rgb(86, 101, 115),
            input_bg: Color::Rgb(44, 44, 44),
        }
    }
}

impl Theme {
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path_ref = path.as_ref();
        match fs::read_to_string(path_ref) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(theme) => theme,
                Err(err) => {
                    tracing::warn!(
                        path = %path_ref.display(),
                        error = %err,
                        "failed to parse theme file, using defaults"
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::debug!(
                    path = %path_ref.display(),
                    error = %err,
                    "theme file not readable, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Colors missing from the file keep their default value.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let cfg: ThemeToml = toml::from_str(s)?;
        let colors = cfg.colors;
        let base = Self::default();
        let pick = |value: Option<RgbToml>, fallback: Color| {
            value.map(|rgb| rgb.to_color()).unwrap_or(fallback)
        };
        Ok(Self {
            background: pick(colors.background, base.background),
            header_fg: pick(colors.header_fg, base.header_fg),
            text_fg: pick(colors.text_fg, base.text_fg),
            user_fg: pick(colors.user_fg, base.user_fg),
            assistant_fg: pick(colors.assistant_fg, base.assistant_fg),
            info_fg: pick(colors.info_fg, base.info_fg),
            error_fg: pick(colors.error_fg, base.error_fg),
            status_fg: pick(colors.status_fg, base.status_fg),
            spinner_fg: pick(colors.spinner_fg, base.spinner_fg),
            selection_fg: pick(colors.selection_fg, base.selection_fg),
            border_fg: pick(colors.border_fg, base.border_fg),
            input_bg: pick(colors.input_bg, base.input_bg),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ThemeToml {
    colors: ThemeColorsToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeColorsToml {
    background: Option<RgbToml>,
    header_fg: Option<RgbToml>,
    text_fg: Option<RgbToml>,
    user_fg: Option<RgbToml>,
    assistant_fg: Option<RgbToml>,
    info_fg: Option<RgbToml>,
    error_fg: Option<RgbToml>,
    status_fg: Option<RgbToml>,
    spinner_fg: Option<RgbToml>,
    selection_fg: Option<RgbToml>,
    border_fg: Option<RgbToml>,
    input_bg: Option<RgbToml>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RgbToml {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbToml {
    fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}
