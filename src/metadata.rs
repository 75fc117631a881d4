//! Display-ready camera metadata.
//!
//! [`Metadata`] holds the fields the frame prints, already normalized by the
//! reader (fractions turned into decimals, units appended). Everything the
//! compositor draws comes from the derived accessors below, which are total:
//! any combination of present and absent fields produces a printable string.
//!
//! ## Derived strings
//!
//! | Accessor | Present fields | Fallback |
//! |---|---|---|
//! | [`Metadata::camera_display_name`] | `"{make} {model}"`, or whichever exists | `"Unknown Camera"` |
//! | [`Metadata::lens_display_name`] | lens model | `"Unknown Lens"` |
//! | [`Metadata::settings_line`] | `"70mm f/5.6 1/125s ISO200"` | `"Settings Unknown"` |
//! | [`Metadata::formatted_timestamp`] | `"20:13:02 2024.12.09"` | raw string, else `""` |
//!
//! An empty or whitespace-only field counts as absent everywhere.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CAMERA: &str = "Unknown Camera";
pub const UNKNOWN_LENS: &str = "Unknown Lens";
pub const UNKNOWN_SETTINGS: &str = "Settings Unknown";

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const DISPLAY_DATETIME_FORMAT: &str = "%H:%M:%S %Y.%m.%d";

/// Camera, lens and exposure fields for one photograph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub lens_model: Option<String>,
    /// Pre-formatted, e.g. `"70mm"`.
    pub focal_length: Option<String>,
    /// Pre-formatted f-number without the `f/` prefix, e.g. `"5.6"`.
    pub aperture: Option<String>,
    /// Pre-formatted without the trailing `s`, e.g. `"1/125"` or `"2"`.
    pub shutter_speed: Option<String>,
    pub iso: Option<String>,
    /// Raw EXIF form `"YYYY:MM:DD HH:MM:SS"`.
    pub capture_timestamp: Option<String>,
}

/// First non-empty value among `sources`, trimmed.
fn resolve<'a>(sources: &[Option<&'a str>]) -> Option<&'a str> {
    sources
        .iter()
        .filter_map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .next()
}

fn present(field: &Option<String>) -> Option<&str> {
    resolve(&[field.as_deref()])
}

impl Metadata {
    /// `"{make} {model}"` when both exist, else whichever exists.
    pub fn camera_display_name(&self) -> String {
        match (present(&self.camera_make), present(&self.camera_model)) {
            (Some(make), Some(model)) => format!("{make} {model}"),
            (None, Some(model)) => model.to_string(),
            (Some(make), None) => make.to_string(),
            (None, None) => UNKNOWN_CAMERA.to_string(),
        }
    }

    pub fn lens_display_name(&self) -> String {
        present(&self.lens_model)
            .unwrap_or(UNKNOWN_LENS)
            .to_string()
    }

    pub fn has_lens(&self) -> bool {
        present(&self.lens_model).is_some()
    }

    /// Space-joined exposure settings in a fixed order.
    pub fn settings_line(&self) -> String {
        let parts: Vec<String> = [
            present(&self.focal_length).map(str::to_string),
            present(&self.aperture).map(|a| format!("f/{a}")),
            present(&self.shutter_speed).map(|s| format!("{s}s")),
            present(&self.iso).map(|iso| format!("ISO{iso}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            UNKNOWN_SETTINGS.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Capture time as `"HH:MM:SS YYYY.MM.DD"`; empty when absent.
    pub fn formatted_timestamp(&self) -> String {
        present(&self.capture_timestamp)
            .map(format_datetime)
            .unwrap_or_default()
    }
}

/// Re-render an EXIF timestamp for display.
///
/// Strings that do not parse as `"YYYY:MM:DD HH:MM:SS"` come back unchanged.
pub fn format_datetime(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATETIME_FORMAT) {
        Ok(dt) => dt.format(DISPLAY_DATETIME_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
