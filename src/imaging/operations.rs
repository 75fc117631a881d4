//! High-level frame operations.
//!
//! These functions combine the pure planners with codec execution:
//! [`plan_frame`] decides everything up front, [`render_plan`] replays the
//! decision against an [`ImageCodec`], and [`generate_frame`] does both.
//!
//! The two framing strategies are mutually exclusive per call. Cinematic
//! bars win when requested and the image is taller than the target ratio;
//! otherwise the bordered frame for the configured layout is used.

use super::backend::{Dimensions, ImageCodec};
use super::calculations::{plan_cinema_bars, plan_geometry};
use super::fonts::FontProvider;
use super::layout::{cinema_bar_text, compact_layout_text, full_layout_text};
use super::params::{CinemaBars, GeometryPlan, Rgb, TextInstruction};
use crate::config::{FrameConfig, Layout, Palette};
use crate::metadata::Metadata;
use log::debug;
use serde::Serialize;

/// Everything needed to draw one frame, decided before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FramePlan {
    /// A new, larger canvas with the source pasted in and a text strip.
    Border {
        geometry: GeometryPlan,
        background: Rgb,
        text: Vec<TextInstruction>,
    },
    /// The source at its own size with letterbox bars painted over it.
    CinemaBars {
        bars: CinemaBars,
        text: Vec<TextInstruction>,
    },
}

impl FramePlan {
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            FramePlan::Border { geometry, .. } => geometry.canvas_size,
            FramePlan::CinemaBars { bars, .. } => bars.canvas_size,
        }
    }

    pub fn text(&self) -> &[TextInstruction] {
        match self {
            FramePlan::Border { text, .. } | FramePlan::CinemaBars { text, .. } => text,
        }
    }
}

/// Decide canvas, bars and text for an image of `size`.
pub fn plan_frame(size: Dimensions, metadata: &Metadata, config: &FrameConfig) -> FramePlan {
    if config.cinema_bars {
        let bars = plan_cinema_bars(size.width, size.height, config.aspect_ratio);
        if bars.is_active() {
            debug!(
                "Cinema bars: {}px each, visible height {}",
                bars.bar_height, bars.target_height
            );
            return FramePlan::CinemaBars {
                text: cinema_bar_text(&bars, metadata, config),
                bars,
            };
        }
        debug!(
            "Image is already wider than {:.2}:1, using the {} border",
            config.aspect_ratio,
            config.layout.as_str()
        );
    }

    let geometry = plan_geometry(size.width, size.height, config.layout);
    let text = match config.layout {
        Layout::Full => full_layout_text(&geometry, metadata, config),
        Layout::Compact => compact_layout_text(&geometry, metadata, config),
    };
    debug!(
        "{} border: canvas {}x{}, image at {:?}",
        config.layout.as_str(),
        geometry.canvas_size.0,
        geometry.canvas_size.1,
        geometry.paste_position
    );
    FramePlan::Border {
        geometry,
        background: config.palette().background,
        text,
    }
}

/// Execute `plan` against `source`, returning the composited canvas.
pub fn render_plan<C: ImageCodec>(
    codec: &C,
    fonts: &impl FontProvider,
    source: &C::Image,
    plan: &FramePlan,
) -> C::Image {
    let mut canvas = match plan {
        FramePlan::Border {
            geometry,
            background,
            ..
        } => {
            let (width, height) = geometry.canvas_size;
            let (x, y) = geometry.paste_position;
            let mut canvas = codec.new_canvas(width, height, *background);
            codec.paste(&mut canvas, source, x, y);
            canvas
        }
        FramePlan::CinemaBars { bars, .. } => {
            let (width, height) = bars.canvas_size;
            let bar_color = Palette::cinema().background;
            let mut canvas = codec.new_canvas(width, height, bar_color);
            codec.paste(&mut canvas, source, 0, 0);
            codec.draw_rect(&mut canvas, bars.top_bar(), bar_color);
            codec.draw_rect(&mut canvas, bars.bottom_bar(), bar_color);
            canvas
        }
    };

    for line in plan.text() {
        let font = fonts.resolve(line.weight, line.font_size_px);
        let (width, height) = codec.measure_text(&line.text, &font);
        let (x, y) = line.origin_for(width, height);
        codec.draw_text(&mut canvas, &line.text, x, y, &font, line.color);
    }
    canvas
}

/// Frame `source` with `metadata` according to `config`.
pub fn generate_frame<C: ImageCodec>(
    codec: &C,
    fonts: &impl FontProvider,
    source: &C::Image,
    metadata: &Metadata,
    config: &FrameConfig,
) -> C::Image {
    let plan = plan_frame(codec.dimensions(source), metadata, config);
    render_plan(codec, fonts, source, &plan)
}
