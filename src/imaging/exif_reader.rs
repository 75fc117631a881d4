//! EXIF extraction into display-ready [`Metadata`].
//!
//! Reads the primary IFD with `kamadak-exif` (JPEG APP1, TIFF, PNG eXIf and
//! WebP containers) and normalizes each field:
//!
//! | Tag | Example raw | Stored as |
//! |---|---|---|
//! | `Make` / `Model` / `LensModel` | `"SONY\0"` | `"SONY"` |
//! | `FocalLength` | `700/10` | `"70mm"` |
//! | `FNumber` | `56/10` | `"5.6"` |
//! | `ExposureTime` | `1/125`, `5/2`, `2/1` | `"1/125"`, `"2.5"`, `"2"` |
//! | `PhotographicSensitivity` | `200` | `"200"` |
//! | `DateTimeOriginal`, else `DateTime` | `"2024:12:09 20:13:02"` | unchanged |
//!
//! Values that cannot be displayed (zero denominators, empty strings) are
//! dropped rather than rendered as garbage.

use super::backend::{BackendError, MetadataReader};
use crate::metadata::Metadata;
use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// [`MetadataReader`] backed by the file's embedded EXIF block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn extract(&self, path: &Path) -> Result<Metadata, BackendError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let exif = exif::Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| BackendError::ProcessingFailed(format!("EXIF: {e}")))?;
        Ok(metadata_from_exif(&exif))
    }
}

/// Normalize the tags of an already parsed EXIF block.
pub fn metadata_from_exif(exif: &Exif) -> Metadata {
    let ascii = |tag: Tag| exif.get_field(tag, In::PRIMARY).and_then(|f| ascii_value(&f.value));
    let rational = |tag: Tag| {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| rational_value(&f.value))
    };

    Metadata {
        camera_make: ascii(Tag::Make),
        camera_model: ascii(Tag::Model),
        lens_model: ascii(Tag::LensModel),
        focal_length: rational(Tag::FocalLength).and_then(format_focal_length),
        aperture: rational(Tag::FNumber).and_then(format_aperture),
        shutter_speed: rational(Tag::ExposureTime).and_then(format_shutter_speed),
        iso: exif
            .get_field(Tag::PhotographicSensitivity, In::PRIMARY)
            .and_then(|f| f.value.get_uint(0))
            .filter(|iso| *iso > 0)
            .map(|iso| iso.to_string()),
        capture_timestamp: ascii(Tag::DateTimeOriginal).or_else(|| ascii(Tag::DateTime)),
    }
}

/// First ASCII component with NUL padding and whitespace removed.
fn ascii_value(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    let raw = parts.first()?;
    let text = String::from_utf8_lossy(raw);
    let cleaned = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// First rational component as `f64`; `None` for a zero denominator.
fn rational_value(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(v) => v
            .first()
            .filter(|r| r.denom != 0)
            .map(|r| r.num as f64 / r.denom as f64),
        Value::SRational(v) => v
            .first()
            .filter(|r| r.denom != 0)
            .map(|r| r.num as f64 / r.denom as f64),
        _ => None,
    }
}

/// Whole millimetres, truncated: `70.0 → "70mm"`, `4.3 → "4mm"`.
pub fn format_focal_length(mm: f64) -> Option<String> {
    (mm.is_finite() && mm > 0.0).then(|| format!("{}mm", mm.trunc() as u32))
}

/// One decimal place, no `f/` prefix.
pub fn format_aperture(f_number: f64) -> Option<String> {
    (f_number.is_finite() && f_number > 0.0).then(|| format!("{f_number:.1}"))
}

/// Exposure time without its unit: `"1/125"` below a second, else `"2"` / `"2.5"`.
pub fn format_shutter_speed(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    if seconds >= 1.0 {
        if seconds.fract() == 0.0 {
            Some(format!("{}", seconds as u64))
        } else {
            Some(format!("{seconds:.1}"))
        }
    } else {
        Some(format!("1/{}", (1.0 / seconds).round() as u64))
    }
}
