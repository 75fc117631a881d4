//! CLI output formatting.
//!
//! # Output Format
//!
//! With `--verbose`, the resolved settings and the metadata that will be
//! printed on the frame are echoed before rendering:
//!
//! ```text
//! Processing: photos/DSC0001.jpg
//! Output: photos/DSC0001_framed.jpg
//! Style: classic
//! Theme: black
//! Layout: compact
//! Quality: 95
//! Font scale: 1.3
//! Cinema bars: off
//!
//! Extracted EXIF data:
//!     Camera: SONY ILCE-7CM2
//!     Lens: 24-70mm F2.8 DG DN II | Art 024
//!     Settings: 70mm f/5.6 1/125s ISO200
//! ```
//!
//! Ctrl-C prints `Operation cancelled by user.` on stderr and exits with
//! [`CANCELLED_EXIT_CODE`]. A successful run always ends with one line:
//!
//! ```text
//! ✓ Frame generated successfully: photos/DSC0001_framed.jpg
//! ```
//!
//! # Architecture
//!
//! Each block has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::FrameConfig;
use crate::metadata::Metadata;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// The resolved paths and frame options.
pub fn format_settings_summary(input: &Path, output: &Path, config: &FrameConfig) -> Vec<String> {
    let cinema = if config.cinema_bars {
        format!("on ({}:1)", config.aspect_ratio)
    } else {
        "off".to_string()
    };
    vec![
        format!("Processing: {}", input.display()),
        format!("Output: {}", output.display()),
        format!("Style: {}", config.style.as_str()),
        format!("Theme: {}", config.theme.as_str()),
        format!("Layout: {}", config.layout.as_str()),
        format!("Quality: {}", config.quality.value()),
        format!("Font scale: {}", config.font_scale),
        format!("Cinema bars: {cinema}"),
    ]
}

pub fn print_settings_summary(input: &Path, output: &Path, config: &FrameConfig) {
    for line in format_settings_summary(input, output, config) {
        println!("{}", line);
    }
}

/// The display strings the frame will carry.
pub fn format_metadata_summary(metadata: &Metadata) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Extracted EXIF data:".to_string(),
        format!("{}Camera: {}", indent(1), metadata.camera_display_name()),
        format!("{}Lens: {}", indent(1), metadata.lens_display_name()),
        format!("{}Settings: {}", indent(1), metadata.settings_line()),
    ];
    let timestamp = metadata.formatted_timestamp();
    if !timestamp.is_empty() {
        lines.push(format!("{}Taken: {}", indent(1), timestamp));
    }
    lines
}

pub fn print_metadata_summary(metadata: &Metadata) {
    for line in format_metadata_summary(metadata) {
        println!("{}", line);
    }
}

/// Exit status after Ctrl-C, distinct from the error status 1.
pub const CANCELLED_EXIT_CODE: i32 = 130;

pub fn format_cancelled() -> String {
    "Operation cancelled by user.".to_string()
}

pub fn format_success(output: &Path) -> String {
    format!("✓ Frame generated successfully: {}", output.display())
}

pub fn print_success(output: &Path) {
    println!("{}", format_success(output));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Layout, Theme};

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    // =========================================================================
    // format_settings_summary
    // =========================================================================

    #[test]
    fn settings_summary_defaults() {
        let lines = format_settings_summary(
            Path::new("in.jpg"),
            Path::new("in_framed.jpg"),
            &FrameConfig::default(),
        );
        assert_eq!(
            lines,
            vec![
                "Processing: in.jpg",
                "Output: in_framed.jpg",
                "Style: classic",
                "Theme: black",
                "Layout: compact",
                "Quality: 95",
                "Font scale: 1.3",
                "Cinema bars: off",
            ]
        );
    }

    #[test]
    fn settings_summary_reflects_overrides() {
        let config = FrameConfig {
            theme: Theme::White,
            layout: Layout::Full,
            cinema_bars: true,
            aspect_ratio: 1.85,
            ..FrameConfig::default()
        };
        let lines = format_settings_summary(Path::new("a.png"), Path::new("b.png"), &config);
        assert!(lines.contains(&"Theme: white".to_string()));
        assert!(lines.contains(&"Layout: full".to_string()));
        assert_eq!(lines.last().unwrap(), "Cinema bars: on (1.85:1)");
    }

    // =========================================================================
    // format_metadata_summary
    // =========================================================================

    #[test]
    fn metadata_summary_with_placeholders() {
        let lines = format_metadata_summary(&Metadata::default());
        assert_eq!(
            lines,
            vec![
                "",
                "Extracted EXIF data:",
                "    Camera: Unknown Camera",
                "    Lens: Unknown Lens",
                "    Settings: Settings Unknown",
            ]
        );
    }

    #[test]
    fn metadata_summary_includes_timestamp_when_present() {
        let meta = Metadata {
            camera_make: Some("FUJIFILM".into()),
            capture_timestamp: Some("2024:12:09 20:13:02".into()),
            ..Metadata::default()
        };
        let lines = format_metadata_summary(&meta);
        assert_eq!(lines[2], "    Camera: FUJIFILM");
        assert_eq!(lines.last().unwrap(), "    Taken: 20:13:02 2024.12.09");
    }

    #[test]
    fn cancellation_is_its_own_exit_path() {
        assert_eq!(format_cancelled(), "Operation cancelled by user.");
        assert_ne!(CANCELLED_EXIT_CODE, 0);
        assert_ne!(CANCELLED_EXIT_CODE, 1);
    }

    #[test]
    fn success_line() {
        assert_eq!(
            format_success(Path::new("out/photo_framed.jpg")),
            "✓ Frame generated successfully: out/photo_framed.jpg"
        );
    }
}
