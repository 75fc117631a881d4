//! Frame composition: pure planning plus a pluggable codec.
//!
//! | Concern | Where |
//! |---|---|
//! | Canvas geometry, font-size heuristic, letterbox bars | [`calculations`] (pure math) |
//! | Which line goes where, in which size and color | [`layout`] (pure) |
//! | Plain data passed between the two halves | [`params`] |
//! | Decode, draw, measure, encode | [`ImageCodec`] / [`RustBackend`] |
//! | EXIF tags into display strings | [`ExifReader`] |
//! | Font lookup with built-in fallback | [`SystemFontProvider`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Layout**: Text-instruction builders per layout variant
//! - **Parameters**: Data structures describing what to draw
//! - **Backend**: [`ImageCodec`] + [`MetadataReader`] traits, [`RustBackend`]
//! - **Operations**: [`plan_frame`] / [`render_plan`] / [`generate_frame`]

pub mod backend;
mod calculations;
pub mod exif_reader;
pub mod fonts;
mod layout;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageCodec, MetadataReader};
pub use calculations::{font_size_for, plan_cinema_bars, plan_geometry};
pub use exif_reader::ExifReader;
pub use fonts::{FontFace, FontFamilies, FontHandle, FontProvider, SystemFontProvider};
pub use layout::{cinema_bar_text, compact_layout_text, full_layout_text};
pub use operations::{FramePlan, generate_frame, plan_frame, render_plan};
pub use params::{
    Align, CinemaBars, GeometryPlan, Quality, Rect, Rgb, TextInstruction, Weight,
};
pub use rust_backend::RustBackend;
