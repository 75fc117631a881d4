//! # exif-frame
//!
//! Instant-camera style frames for digital photos. The camera, lens and
//! exposure settings embedded in a photo are printed on a border around it,
//! or in letterbox bars painted over it.
//!
//! # Architecture: Plan, Then Render
//!
//! Framing one image is split into a pure planning half and a thin rendering
//! half:
//!
//! ```text
//! 1. Read      photo.jpg      →  Metadata         (EXIF → display strings)
//! 2. Plan      size + config  →  FramePlan        (canvas, paste offset, text lines)
//! 3. Render    FramePlan      →  photo_framed.jpg (codec draws what the plan says)
//! ```
//!
//! Every number that decides how the frame looks (margins, font sizes, line
//! positions, bar heights) is computed in step 2 by pure functions over plain
//! data. That keeps the layout rules unit-testable without decoding a single
//! image, lets `--print-plan` dump the exact plan as JSON, and lets the
//! compositor run against a recording mock codec in tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Display-ready metadata and its derived strings (camera name, settings line, timestamp) |
//! | [`imaging`] | Geometry planner, font-size heuristic, text layout, codec/reader/font traits and their implementations |
//! | [`config`] | `exif-frame.toml` loading, CLI overrides, merging and validation |
//! | [`process`] | The single-image pipeline and its error taxonomy |
//! | [`naming`] | Default output path derivation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` crate, drawing uses `imageproc`, and
//! outline fonts are rasterized by `ab_glyph`. There are no system libraries
//! to install; the binary is self-contained.
//!
//! ## Fonts Never Fail
//!
//! Fonts are looked up by file name in the configured and platform font
//! directories, in priority order per weight. When nothing is installed the
//! renderer falls back to a built-in 8x8 bitmap face, so a frame is always
//! produced, if plainer.
//!
//! ## Missing Metadata Is Not an Error
//!
//! A photo without EXIF still gets a frame, captioned "Unknown Camera" and
//! "Settings Unknown". Only an unreadable input or an unwritable output stop
//! the run.

pub mod config;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
