//! Parameter types for frame composition.
//!
//! These structs describe *what* to draw, not *how* to draw it. They are the
//! interface between the pure planners ([`calculations`](super::calculations),
//! [`layout`](super::layout)) and the [`backend`](super::backend) that does the
//! pixel work. Keeping them plain data is what lets the compositor be tested
//! against a mock codec and dumped as JSON with `--print-plan`.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`Rgb`]: A fixed color triple; there is no color management beyond this.
//! - [`Rect`]: Axis-aligned rectangle in canvas pixels.
//! - [`GeometryPlan`]: Canvas size, paste offset and text region of a bordered frame.
//! - [`CinemaBars`]: Letterbox bars painted over an unchanged canvas.
//! - [`TextInstruction`]: One line of text: string, anchor, size, weight, color.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const LIGHT_GRAY: Rgb = Rgb(180, 180, 180);
    pub const DARK_GRAY: Rgb = Rgb(80, 80, 80);
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Font weight requested from the font provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    Regular,
    Medium,
}

/// What the horizontal anchor of a [`TextInstruction`] refers to.
///
/// - `Left`: `anchor_x` is where the text starts
/// - `Center`: `anchor_x` is the text's horizontal midpoint
/// - `Right`: `anchor_x` is where the text ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One line of text to draw.
///
/// `anchor_y` is always the vertical midpoint of the line; the renderer
/// centers the measured text box on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInstruction {
    pub text: String,
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub align: Align,
    pub font_size_px: u32,
    pub weight: Weight,
    pub color: Rgb,
}

impl TextInstruction {
    /// Top-left corner for a rendered box of `width` x `height`.
    pub fn origin_for(&self, width: u32, height: u32) -> (i32, i32) {
        let x = match self.align {
            Align::Left => self.anchor_x,
            Align::Center => self.anchor_x - (width / 2) as i32,
            Align::Right => self.anchor_x - width as i32,
        };
        (x, self.anchor_y - (height / 2) as i32)
    }
}

/// Where everything goes on a bordered frame.
///
/// Invariant: `canvas_size` is at least the source size in both dimensions
/// and `paste_position + source size <= canvas_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryPlan {
    pub canvas_size: (u32, u32),
    pub paste_position: (u32, u32),
    pub text_region_top: u32,
    pub text_region_height: u32,
    pub side_margin: u32,
}

impl GeometryPlan {
    pub fn text_region_width(&self) -> u32 {
        self.canvas_size.0.saturating_sub(2 * self.side_margin)
    }
}

/// Letterbox bars painted over the source image.
///
/// The canvas is the source size. `bar_height == 0` means the image is
/// already at least as wide as the target ratio and the bars are a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaBars {
    pub canvas_size: (u32, u32),
    pub target_height: u32,
    pub bar_height: u32,
}

impl CinemaBars {
    pub fn is_active(&self) -> bool {
        self.bar_height > 0
    }

    /// Spans rows `[0, bar_height)`.
    pub fn top_bar(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.canvas_size.0,
            height: self.bar_height,
        }
    }

    /// Spans rows `[height - bar_height, height)`.
    pub fn bottom_bar(&self) -> Rect {
        Rect {
            x: 0,
            y: self.canvas_size.1 - self.bar_height,
            width: self.canvas_size.0,
            height: self.bar_height,
        }
    }
}
