//! Codec and metadata-reader traits, plus shared types.
//!
//! The compositor never touches pixels or files directly. It drives an
//! [`ImageCodec`] (open, draw, paste, measure, save) and reads tags through a
//! [`MetadataReader`], so the whole framing pipeline runs against the
//! recording mock in [`tests`] as easily as against
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::fonts::FontHandle;
use super::params::{Quality, Rect, Rgb};
use crate::metadata::Metadata;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel size of an image handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Pixel-level operations the compositor needs.
///
/// Drawing calls clip to the canvas; they never fail.
pub trait ImageCodec {
    type Image;

    /// Decode `path` into an RGB canvas.
    fn open(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Cheap check that `path` is an image this codec can read.
    fn decode_verify(&self, path: &Path) -> bool;

    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Encode to `path`; the format follows the file extension.
    fn save(&self, image: &Self::Image, path: &Path, quality: Quality)
    -> Result<(), BackendError>;

    fn new_canvas(&self, width: u32, height: u32, fill: Rgb) -> Self::Image;

    fn paste(&self, canvas: &mut Self::Image, source: &Self::Image, x: u32, y: u32);

    fn draw_rect(&self, canvas: &mut Self::Image, rect: Rect, color: Rgb);

    fn draw_ellipse(
        &self,
        canvas: &mut Self::Image,
        center: (i32, i32),
        radii: (u32, u32),
        color: Rgb,
    );

    /// Draw `text` with its top-left corner at `(x, y)`. Returns the rendered height.
    fn draw_text(
        &self,
        canvas: &mut Self::Image,
        text: &str,
        x: i32,
        y: i32,
        font: &FontHandle,
        color: Rgb,
    ) -> u32;

    /// Rendered `(width, height)` of `text`.
    fn measure_text(&self, text: &str, font: &FontHandle) -> (u32, u32);
}

/// Reads camera metadata embedded in an image file.
pub trait MetadataReader {
    /// Fails when the file has no readable tag block; callers degrade to
    /// [`Metadata::default`].
    fn extract(&self, path: &Path) -> Result<Metadata, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::Weight;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Stand-in image: only the size matters to the compositor.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MockImage {
        pub width: u32,
        pub height: u32,
    }

    /// Mock codec that records operations without touching pixels.
    ///
    /// `open` answers from `images` by path; anything else is "not an image".
    /// Text measures half the font size per char and one font size tall.
    #[derive(Default)]
    pub struct MockCodec {
        pub images: HashMap<PathBuf, Dimensions>,
        pub fail_save: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Open(String),
        NewCanvas {
            width: u32,
            height: u32,
            fill: Rgb,
        },
        Paste {
            x: u32,
            y: u32,
            width: u32,
            height: u32,
        },
        Rect {
            rect: Rect,
            color: Rgb,
        },
        Ellipse {
            center: (i32, i32),
            radii: (u32, u32),
            color: Rgb,
        },
        Text {
            text: String,
            x: i32,
            y: i32,
            size: u32,
            color: Rgb,
        },
        Save {
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
            let mut codec = Self::default();
            codec.images.insert(path.into(), Dimensions { width, height });
            codec
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn texts(&self) -> Vec<String> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Text { text, .. } => Some(text),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageCodec for MockCodec {
        type Image = MockImage;

        fn open(&self, path: &Path) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Open(path.to_string_lossy().to_string()));
            self.images
                .get(path)
                .map(|d| MockImage {
                    width: d.width,
                    height: d.height,
                })
                .ok_or_else(|| BackendError::ProcessingFailed("No mock image".to_string()))
        }

        fn decode_verify(&self, path: &Path) -> bool {
            self.images.contains_key(path)
        }

        fn dimensions(&self, image: &MockImage) -> Dimensions {
            Dimensions {
                width: image.width,
                height: image.height,
            }
        }

        fn save(&self, image: &MockImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
            if self.fail_save {
                return Err(BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only mock",
                )));
            }
            self.record(RecordedOp::Save {
                output: path.to_string_lossy().to_string(),
                width: image.width,
                height: image.height,
                quality: quality.value(),
            });
            Ok(())
        }

        fn new_canvas(&self, width: u32, height: u32, fill: Rgb) -> MockImage {
            self.record(RecordedOp::NewCanvas {
                width,
                height,
                fill,
            });
            MockImage { width, height }
        }

        fn paste(&self, _canvas: &mut MockImage, source: &MockImage, x: u32, y: u32) {
            self.record(RecordedOp::Paste {
                x,
                y,
                width: source.width,
                height: source.height,
            });
        }

        fn draw_rect(&self, _canvas: &mut MockImage, rect: Rect, color: Rgb) {
            self.record(RecordedOp::Rect { rect, color });
        }

        fn draw_ellipse(
            &self,
            _canvas: &mut MockImage,
            center: (i32, i32),
            radii: (u32, u32),
            color: Rgb,
        ) {
            self.record(RecordedOp::Ellipse {
                center,
                radii,
                color,
            });
        }

        fn draw_text(
            &self,
            _canvas: &mut MockImage,
            text: &str,
            x: i32,
            y: i32,
            font: &FontHandle,
            color: Rgb,
        ) -> u32 {
            self.record(RecordedOp::Text {
                text: text.to_string(),
                x,
                y,
                size: font.size_px,
                color,
            });
            font.size_px
        }

        fn measure_text(&self, text: &str, font: &FontHandle) -> (u32, u32) {
            (text.chars().count() as u32 * font.size_px / 2, font.size_px)
        }
    }

    /// Metadata reader that returns a fixed answer, or fails when given `None`.
    pub struct MockReader(pub Option<Metadata>);

    impl MetadataReader for MockReader {
        fn extract(&self, _path: &Path) -> Result<Metadata, BackendError> {
            self.0
                .clone()
                .ok_or_else(|| BackendError::ProcessingFailed("no EXIF block".to_string()))
        }
    }

    /// Font provider that always hands out the built-in face.
    pub struct MockFonts;

    impl super::super::fonts::FontProvider for MockFonts {
        fn resolve(&self, _weight: Weight, size_px: u32) -> FontHandle {
            FontHandle::builtin(size_px)
        }
    }

    #[test]
    fn mock_opens_known_images_only() {
        let codec = MockCodec::with_image("/photos/a.jpg", 800, 600);
        let image = codec.open(Path::new("/photos/a.jpg")).unwrap();
        assert_eq!(
            codec.dimensions(&image),
            Dimensions {
                width: 800,
                height: 600
            }
        );
        assert!(codec.decode_verify(Path::new("/photos/a.jpg")));
        assert!(!codec.decode_verify(Path::new("/photos/b.jpg")));
        assert!(codec.open(Path::new("/photos/b.jpg")).is_err());

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Open(p) if p == "/photos/a.jpg"));
    }

    #[test]
    fn mock_records_save_quality() {
        let codec = MockCodec::new();
        let canvas = codec.new_canvas(10, 20, Rgb::BLACK);
        codec
            .save(&canvas, Path::new("/out.jpg"), Quality::new(90))
            .unwrap();

        let ops = codec.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::Save {
                width: 10,
                height: 20,
                quality: 90,
                ..
            }
        ));
    }

    #[test]
    fn mock_measures_half_size_per_char() {
        let codec = MockCodec::new();
        assert_eq!(codec.measure_text("abcd", &FontHandle::builtin(30)), (60, 30));
    }

    #[test]
    fn mock_reader_failure_is_an_error() {
        assert!(MockReader(None).extract(Path::new("/x.jpg")).is_err());
        assert_eq!(
            MockReader(Some(Metadata::default()))
                .extract(Path::new("/x.jpg"))
                .unwrap(),
            Metadata::default()
        );
    }
}
