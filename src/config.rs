//! Frame configuration.
//!
//! Handles loading, validating, and merging configuration. Settings are
//! layered, last wins:
//!
//! ```text
//! stock defaults  →  exif-frame.toml  →  command-line flags
//! ```
//!
//! The config file is taken from `--config <PATH>` or, when that flag is
//! absent, from `exif-frame.toml` next to the input image.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [frame]
//! style = "classic"     # classic | modern (reserved)
//! theme = "black"       # black | white
//! layout = "compact"    # compact | full
//! font_scale = 1.3      # 0.5 - 3.0
//! quality = 95          # JPEG quality, 1 - 100
//! cinema_bars = false   # letterbox instead of a border
//! aspect_ratio = 2.39   # letterbox target, width / height
//!
//! [fonts]
//! dirs = []             # extra font directories, searched first
//! medium = []           # font file names for headings, highest priority first
//! regular = []          # font file names for secondary lines
//! ```
//!
//! Unknown keys are rejected to catch typos early. Everything is validated
//! once, here; the compositor consumes [`FrameConfig`] read-only.

use crate::imaging::{Quality, Rgb};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up next to the input image when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "exif-frame.toml";

pub const FONT_SCALE_RANGE: (f64, f64) = (0.5, 3.0);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Frame style. Accepted for compatibility; both styles render identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Classic,
    Modern,
}

/// Border and text color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Black border, white text.
    #[default]
    Black,
    /// White border, black text.
    White,
}

/// Where the border goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Image edge to edge, bottom strip only, left/right text split.
    #[default]
    Compact,
    /// Image inset on all sides, centered text.
    Full,
}

macro_rules! lowercase_names {
    ($($ty:ty { $($variant:ident => $name:literal),+ $(,)? })+) => {
        $(impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        })+
    };
}

lowercase_names! {
    Style { Classic => "classic", Modern => "modern" }
    Theme { Black => "black", White => "white" }
    Layout { Compact => "compact", Full => "full" }
}

/// The three colors a frame is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Black => Self {
                background: Rgb::BLACK,
                primary: Rgb::WHITE,
                secondary: Rgb::LIGHT_GRAY,
            },
            Theme::White => Self {
                background: Rgb::WHITE,
                primary: Rgb::BLACK,
                secondary: Rgb::DARK_GRAY,
            },
        }
    }

    /// Cinematic bars are black whatever the theme says.
    pub fn cinema() -> Self {
        Self::for_theme(Theme::Black)
    }
}

/// Fully resolved options for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub style: Style,
    pub theme: Theme,
    pub layout: Layout,
    /// Multiplier applied by the font-size heuristic (0.5 - 3.0).
    pub font_scale: f64,
    /// Encoding quality for lossy output formats.
    pub quality: Quality,
    /// Paint letterbox bars instead of adding a border.
    pub cinema_bars: bool,
    /// Letterbox target as width / height. Only read when `cinema_bars` is set.
    pub aspect_ratio: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            theme: Theme::default(),
            layout: Layout::default(),
            font_scale: 1.3,
            quality: Quality::default(),
            cinema_bars: false,
            aspect_ratio: 2.39,
        }
    }
}

impl FrameConfig {
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (lo, hi) = FONT_SCALE_RANGE;
        if !(lo..=hi).contains(&self.font_scale) {
            return Err(ConfigError::Validation(format!(
                "frame.font_scale must be {lo}-{hi}, got {}",
                self.font_scale
            )));
        }
        if !(1..=100).contains(&self.quality.value()) {
            return Err(ConfigError::Validation(format!(
                "frame.quality must be 1-100, got {}",
                self.quality.value()
            )));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "frame.aspect_ratio must be a positive number, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Font search settings. Empty lists fall back to the platform defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Extra directories searched before the system font directories.
    pub dirs: Vec<PathBuf>,
    /// Font file names for medium-weight lines, highest priority first.
    pub medium: Vec<String>,
    /// Font file names for regular-weight lines, highest priority first.
    pub regular: Vec<String>,
}

/// Everything `exif-frame.toml` can hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub frame: FrameConfig,
    pub fonts: FontConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frame.validate()
    }
}

/// Frame options given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub style: Option<Style>,
    pub theme: Option<Theme>,
    pub layout: Option<Layout>,
    pub font_scale: Option<f64>,
    pub quality: Option<u32>,
    pub cinema_bars: Option<bool>,
    pub aspect_ratio: Option<f64>,
}

impl CliOverrides {
    /// Render the given flags as a sparse `[frame]` table for merging.
    pub fn to_toml(&self) -> toml::Value {
        let mut frame = toml::map::Map::new();
        let mut put = |key: &str, value: toml::Value| {
            frame.insert(key.to_string(), value);
        };
        if let Some(style) = self.style {
            put("style", style.as_str().into());
        }
        if let Some(theme) = self.theme {
            put("theme", theme.as_str().into());
        }
        if let Some(layout) = self.layout {
            put("layout", layout.as_str().into());
        }
        if let Some(scale) = self.font_scale {
            put("font_scale", scale.into());
        }
        if let Some(quality) = self.quality {
            put("quality", i64::from(quality).into());
        }
        if let Some(bars) = self.cinema_bars {
            put("cinema_bars", bars.into());
        }
        if let Some(ratio) = self.aspect_ratio {
            put("aspect_ratio", ratio.into());
        }

        let mut root = toml::map::Map::new();
        if !frame.is_empty() {
            root.insert("frame".to_string(), toml::Value::Table(frame));
        }
        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(Config::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Pick the config file to read, if any.
///
/// An explicit path always wins (and must exist). Otherwise
/// [`CONFIG_FILE_NAME`] next to the input image is used when present.
pub fn find_config_file(explicit: Option<&Path>, input_image: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let dir = input_image
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Merge overlays in order onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlays: Vec<toml::Value>) -> Result<Config, ConfigError> {
    let merged = overlays
        .into_iter()
        .fold(stock_defaults_value()?, merge_toml);
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Resolve the effective config: stock defaults, then the config file, then CLI flags.
pub fn load_config(
    config_file: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Config, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(path) = config_file {
        overlays.push(load_raw_config(path)?);
    }
    overlays.push(overrides.to_toml());
    resolve_config(overlays)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# exif-frame configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The file is read from --config <PATH>, or from exif-frame.toml in the
# same directory as the input image. Command-line flags override it.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Frame
# ---------------------------------------------------------------------------
[frame]
# Frame style: "classic" or "modern". Reserved; both render the same frame.
style = "classic"

# "black": black border with white text.
# "white": white border with black text.
theme = "black"

# "compact": image touches the top and sides, metadata strip at the bottom,
#            camera on the left and settings on the right.
# "full":    border on all sides, metadata centered below the image.
layout = "compact"

# Font size multiplier (0.5 - 3.0).
font_scale = 1.3

# JPEG quality (1 - 100). Ignored for lossless output formats.
quality = 95

# Paint black letterbox bars over the image instead of adding a border.
# The metadata is written into the bottom bar.
cinema_bars = false

# Letterbox target ratio (width / height), e.g. 2.39 for scope, 1.85 for flat.
aspect_ratio = 2.39

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[fonts]
# Extra directories to search for font files, before the system directories.
dirs = []

# Font file names tried in order for the camera / settings lines.
# Leave empty to use the platform list (Helvetica Neue, Roboto, DejaVu, ...).
medium = []

# Font file names tried in order for the lens / timestamp lines.
regular = []
"##
}
