//! Text layout: turning metadata into positioned lines.
//!
//! Three compositions, all pure:
//!
//! ```text
//! full                         compact                          cinema bars
//! ┌──────────────────────┐     ┌──────────────────────────┐     ┌──────────────────┐
//! │   ┌──────────────┐   │     │                          │     │██████████████████│
//! │   │    image     │   │     │          image           │     │      image       │
//! │   └──────────────┘   │     │                          │     │████ camera ██████│
//! │   camera / lens      │     ├──────────────────────────┤     │████ settings ████│
//! │  settings • time     │     │ camera        settings   │     └──────────────────┘
//! └──────────────────────┘     │ lens              time   │
//!                              └──────────────────────────┘
//! ```
//!
//! Lines are stacked in slots: a slot is as tall as its line pitch, a block is
//! as tall as the sum of its slots, and each line's `anchor_y` is the middle
//! of its slot. Slots never overlap, so neither do the lines drawn in them.
//! When a block is taller than its region (a thin letterbox bar), the leading
//! is squeezed first; a slot never gets shorter than its font size.
//! An absent lens or timestamp removes its slot entirely instead of leaving a
//! gap sized for it.

use super::calculations::{font_size_for, round_px};
use super::params::{Align, CinemaBars, GeometryPlan, Rgb, TextInstruction, Weight};
use crate::config::{FrameConfig, Palette};
use crate::metadata::Metadata;

/// Line pitch multiplier for centered two-line blocks (full layout, cinema bars).
const CENTERED_LINE_PITCH: f64 = 1.4;
/// Line pitch multiplier for the compact left/right blocks.
const COMPACT_LINE_PITCH: f64 = 1.2;
/// Secondary lines are drawn at this fraction of the primary size.
const SECONDARY_RATIO: f64 = 0.75;
/// Compact text runs larger than the heuristic since its strip is shallower.
const COMPACT_BOOST: f64 = 1.3;
/// Default distance of the compact text blocks from the canvas edges.
const COMPACT_TEXT_MARGIN: u32 = 100;
const COMPACT_MIN_BASE_PX: u32 = 24;

const CINEMA_MIN_BASE_PX: u32 = 20;
const CINEMA_BAR_FRACTION: f64 = 0.3;
const CINEMA_BOOST: f64 = 1.3;
const CINEMA_SIZE_RANGE: (u32, u32) = (24, 80);

const BULLET: &str = " • ";

/// One line before it has been placed.
struct Line {
    text: String,
    size: u32,
    weight: Weight,
    color: Rgb,
}

impl Line {
    fn new(text: impl Into<String>, size: u32, weight: Weight, color: Rgb) -> Self {
        Self {
            text: text.into(),
            size,
            weight,
            color,
        }
    }
}

fn secondary_size(primary: u32) -> u32 {
    round_px(primary as f64 * SECONDARY_RATIO)
}

fn pitch(size: u32, multiplier: f64) -> u32 {
    round_px(size as f64 * multiplier)
}

/// Slot heights for `lines`, squeezed to fit `region_height` when possible.
///
/// Only the leading (pitch minus size) shrinks, in proportion per line; a
/// slot is never shorter than its line's font size.
fn fit_slots(lines: &[Line], pitch_multiplier: f64, region_height: u32) -> Vec<u32> {
    let pitches: Vec<u32> = lines
        .iter()
        .map(|line| pitch(line.size, pitch_multiplier).max(line.size))
        .collect();
    if pitches.iter().sum::<u32>() <= region_height {
        return pitches;
    }

    let ink: u32 = lines.iter().map(|line| line.size).sum();
    let leading: u64 = lines
        .iter()
        .zip(&pitches)
        .map(|(line, slot)| u64::from(slot - line.size))
        .sum();
    let spare = u64::from(region_height.saturating_sub(ink));
    lines
        .iter()
        .zip(&pitches)
        .map(|(line, slot)| {
            let own = u64::from(slot - line.size);
            let kept = if leading == 0 { 0 } else { own * spare / leading };
            line.size + kept as u32
        })
        .collect()
}

/// Center `lines` as one block inside `[region_top, region_top + region_height)`.
///
/// A block that cannot fit even at minimum leading starts at `region_top`
/// and runs past the bottom instead of above the region.
fn stack_lines(
    lines: Vec<Line>,
    anchor_x: i32,
    align: Align,
    region_top: u32,
    region_height: u32,
    pitch_multiplier: f64,
) -> Vec<TextInstruction> {
    let slots = fit_slots(&lines, pitch_multiplier, region_height);
    let block_height: u32 = slots.iter().sum();
    let offset = (region_height as i32 - block_height as i32) / 2;
    let mut slot_top = region_top as i32 + offset.max(0);

    lines
        .into_iter()
        .zip(slots)
        .map(|(line, slot)| {
            let anchor_y = slot_top + (slot / 2) as i32;
            slot_top += slot as i32;
            TextInstruction {
                text: line.text,
                anchor_x,
                anchor_y,
                align,
                font_size_px: line.size,
                weight: line.weight,
                color: line.color,
            }
        })
        .collect()
}

/// The two centered lines shared by the full layout and the cinema bars.
///
/// Line 1: `"{camera} / {lens}"`, lens omitted when unknown.
/// Line 2: `"{settings} • {timestamp}"`, timestamp omitted when absent.
fn centered_texts(metadata: &Metadata) -> (String, String) {
    let mut heading = metadata.camera_display_name();
    if metadata.has_lens() {
        heading.push_str(" / ");
        heading.push_str(&metadata.lens_display_name());
    }

    let mut details = metadata.settings_line();
    let timestamp = metadata.formatted_timestamp();
    if !timestamp.is_empty() {
        details.push_str(BULLET);
        details.push_str(&timestamp);
    }
    (heading, details)
}

/// Full layout: two centered lines in the strip below the inset image.
pub fn full_layout_text(
    plan: &GeometryPlan,
    metadata: &Metadata,
    config: &FrameConfig,
) -> Vec<TextInstruction> {
    let palette = config.palette();
    let (heading, details) = centered_texts(metadata);

    let heading_size = font_size_for(
        &heading,
        plan.text_region_width() as f64,
        plan.text_region_height as f64 / 2.0,
        config.font_scale,
    );
    let details_size = secondary_size(heading_size);

    stack_lines(
        vec![
            Line::new(heading, heading_size, Weight::Medium, palette.primary),
            Line::new(details, details_size, Weight::Regular, palette.secondary),
        ],
        (plan.canvas_size.0 / 2) as i32,
        Align::Center,
        plan.text_region_top,
        plan.text_region_height,
        CENTERED_LINE_PITCH,
    )
}

/// Compact layout: camera block on the left, settings block on the right.
///
/// Each block is one or two lines and is centered in the strip on its own.
pub fn compact_layout_text(
    plan: &GeometryPlan,
    metadata: &Metadata,
    config: &FrameConfig,
) -> Vec<TextInstruction> {
    let palette = config.palette();
    let base = round_px(
        round_px(plan.text_region_height as f64 * 0.15).max(COMPACT_MIN_BASE_PX) as f64
            * COMPACT_BOOST,
    );
    let secondary = secondary_size(base);

    let canvas_width = plan.canvas_size.0;
    let margin = COMPACT_TEXT_MARGIN.min(canvas_width / 4);

    let mut left = vec![Line::new(
        metadata.camera_display_name(),
        base,
        Weight::Medium,
        palette.primary,
    )];
    if metadata.has_lens() {
        left.push(Line::new(
            metadata.lens_display_name(),
            secondary,
            Weight::Regular,
            palette.secondary,
        ));
    }

    let mut right = vec![Line::new(
        metadata.settings_line(),
        base,
        Weight::Medium,
        palette.primary,
    )];
    let timestamp = metadata.formatted_timestamp();
    if !timestamp.is_empty() {
        right.push(Line::new(
            timestamp,
            secondary,
            Weight::Regular,
            palette.secondary,
        ));
    }

    let mut instructions = stack_lines(
        left,
        margin as i32,
        Align::Left,
        plan.text_region_top,
        plan.text_region_height,
        COMPACT_LINE_PITCH,
    );
    instructions.extend(stack_lines(
        right,
        (canvas_width - margin) as i32,
        Align::Right,
        plan.text_region_top,
        plan.text_region_height,
        COMPACT_LINE_PITCH,
    ));
    instructions
}

/// Cinematic bars: the centered two-line block inside the bottom bar.
///
/// Sizes are rebased on the bar height and colors are fixed, since the bars
/// are black regardless of theme.
pub fn cinema_bar_text(
    bars: &CinemaBars,
    metadata: &Metadata,
    config: &FrameConfig,
) -> Vec<TextInstruction> {
    let palette = Palette::cinema();
    let (heading, details) = centered_texts(metadata);

    let (lower, upper) = CINEMA_SIZE_RANGE;
    let base = round_px(
        round_px(bars.bar_height as f64 * CINEMA_BAR_FRACTION).max(CINEMA_MIN_BASE_PX) as f64
            * config.font_scale
            * CINEMA_BOOST,
    )
    .clamp(lower, upper);

    let bottom = bars.bottom_bar();
    stack_lines(
        vec![
            Line::new(heading, base, Weight::Medium, palette.primary),
            Line::new(details, secondary_size(base), Weight::Regular, palette.secondary),
        ],
        (bars.canvas_size.0 / 2) as i32,
        Align::Center,
        bottom.y,
        bottom.height,
        CENTERED_LINE_PITCH,
    )
}
