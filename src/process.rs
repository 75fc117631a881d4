//! The single-image pipeline behind the CLI.
//!
//! ```text
//! verify input ─→ read metadata ─→ decode ─→ plan + render ─→ save
//!      │               │                                        │
//!   fatal         degrades to                                 fatal
//!                 Metadata::default()
//! ```
//!
//! Each step is a separate function so the binary can echo settings and
//! metadata between them, or stop after planning. Conditions with a safe default are absorbed here
//! (missing EXIF); everything else surfaces as a [`ProcessError`].

use crate::config::{ConfigError, FrameConfig};
use crate::imaging::{
    BackendError, FontProvider, FramePlan, ImageCodec, MetadataReader, generate_frame, plan_frame,
};
use crate::metadata::Metadata;
use log::{info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Input file '{0}' does not exist")]
    InputNotFound(PathBuf),
    #[error("'{0}' is not a valid image file")]
    InvalidInput(PathBuf),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Error generating frame: {0}")]
    Compositing(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fail early unless `input` exists and decodes as an image.
pub fn verify_input(codec: &impl ImageCodec, input: &Path) -> Result<(), ProcessError> {
    if !input.is_file() {
        return Err(ProcessError::InputNotFound(input.to_path_buf()));
    }
    if !codec.decode_verify(input) {
        return Err(ProcessError::InvalidInput(input.to_path_buf()));
    }
    Ok(())
}

/// Read the metadata to print, or all-absent metadata if there is none.
pub fn read_metadata(reader: &impl MetadataReader, input: &Path) -> Metadata {
    match reader.extract(input) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Error reading EXIF data from {}: {e}", input.display());
            Metadata::default()
        }
    }
}

/// Compute the frame plan for `input` without rendering it.
pub fn plan_file<C: ImageCodec>(
    codec: &C,
    input: &Path,
    metadata: &Metadata,
    config: &FrameConfig,
) -> Result<FramePlan, ProcessError> {
    let source = codec.open(input)?;
    Ok(plan_frame(codec.dimensions(&source), metadata, config))
}

/// Decode `input`, frame it and write the result to `output`.
///
/// Missing parent directories of `output` are created.
pub fn frame_image<C: ImageCodec>(
    codec: &C,
    fonts: &impl FontProvider,
    input: &Path,
    output: &Path,
    metadata: &Metadata,
    config: &FrameConfig,
) -> Result<(), ProcessError> {
    let source = codec.open(input)?;
    let framed = generate_frame(codec, fonts, &source, metadata, config);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    codec.save(&framed, output, config.quality)?;
    info!("Wrote {}", output.display());
    Ok(())
}
