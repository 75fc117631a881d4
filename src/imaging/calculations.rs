//! Pure calculation functions for frame geometry and type sizes.
//!
//! All functions here are pure and testable without any I/O or images.
//! They are total over every positive image size: a 1x1 source still gets
//! a valid (if useless) plan.

use super::params::{CinemaBars, GeometryPlan};
use crate::config::Layout;

/// Full layout: border on each side, as a fraction of the image width.
const FULL_SIDE_MARGIN: f64 = 0.05;
/// Full layout: border above the image, as a fraction of the image height.
const FULL_TOP_MARGIN: f64 = 0.05;
/// Full layout: metadata strip below the image, as a fraction of the image height.
const FULL_TEXT_REGION: f64 = 0.25;
/// Compact layout: metadata strip below the image, as a fraction of the image height.
const COMPACT_TEXT_REGION: f64 = 0.15;

/// Font-size heuristic bounds, before scaling.
const MIN_FONT_PX: f64 = 24.0;
const MAX_FONT_PX: f64 = 72.0;

/// Round half away from zero into pixel units. Negative input clamps to 0.
pub(crate) fn round_px(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Plan the canvas for a bordered frame.
///
/// | Layout | Side | Top | Bottom (text region) | Paste at |
/// |---|---|---|---|---|
/// | `Full` | 5% of width | 5% of height | 25% of height | `(side, top)` |
/// | `Compact` | 0 | 0 | 15% of height | `(0, 0)` |
///
/// # Examples
/// ```
/// # use exif_frame::config::Layout;
/// # use exif_frame::imaging::plan_geometry;
/// let plan = plan_geometry(1200, 800, Layout::Compact);
/// assert_eq!(plan.canvas_size, (1200, 920));
/// assert_eq!(plan.paste_position, (0, 0));
/// ```
pub fn plan_geometry(width: u32, height: u32, layout: Layout) -> GeometryPlan {
    let (side_margin, top_margin, bottom_margin) = match layout {
        Layout::Full => (
            round_px(width as f64 * FULL_SIDE_MARGIN),
            round_px(height as f64 * FULL_TOP_MARGIN),
            round_px(height as f64 * FULL_TEXT_REGION),
        ),
        Layout::Compact => (0, 0, round_px(height as f64 * COMPACT_TEXT_REGION)),
    };

    GeometryPlan {
        canvas_size: (
            width + 2 * side_margin,
            height + top_margin + bottom_margin,
        ),
        paste_position: (side_margin, top_margin),
        text_region_top: height + top_margin,
        text_region_height: bottom_margin,
        side_margin,
    }
}

/// Pick a pixel font size for `text` inside a `max_width` x `max_height` box.
///
/// This estimates an average glyph width instead of measuring, because no
/// concrete font has been chosen yet. Long strings in narrow boxes may still
/// overflow slightly.
///
/// ```text
/// height_bound = max_height / 3
/// width_bound  = max_width / max(1, chars) * 3
/// size         = clamp(round(min(..) * scale), round(24 * scale), round(72 * scale))
/// ```
pub fn font_size_for(text: &str, max_width: f64, max_height: f64, font_scale: f64) -> u32 {
    let chars = text.chars().count().max(1) as f64;
    let height_bound = max_height / 3.0;
    let width_bound = (max_width / chars) * 3.0;
    let scaled = round_px(height_bound.min(width_bound) * font_scale);

    let lower = round_px(MIN_FONT_PX * font_scale);
    let upper = round_px(MAX_FONT_PX * font_scale);
    scaled.clamp(lower, upper)
}

/// Plan letterbox bars that crop the visible image to `aspect_ratio`.
///
/// Returns zero-height bars when the image is already at least as wide as
/// the target, in which case the normal border frame applies instead.
pub fn plan_cinema_bars(width: u32, height: u32, aspect_ratio: f64) -> CinemaBars {
    let target_height = round_px(width as f64 / aspect_ratio);
    let bar_height = if target_height >= height {
        0
    } else {
        round_px((height - target_height) as f64 / 2.0).min(height / 2)
    };

    CinemaBars {
        canvas_size: (width, height),
        target_height,
        bar_height,
    }
}
