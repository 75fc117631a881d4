//! Pure Rust codec: everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode PNG, TIFF, WebP | `image` default encoders (lossless, quality ignored) |
//! | Paste | `image::imageops::replace` |
//! | Rectangles, ellipses | `imageproc::drawing` |
//! | Outline text | `imageproc::drawing::draw_text_mut` with an `ab_glyph` face |
//! | Built-in text | `font8x8` glyphs drawn as filled pixel blocks |

use super::backend::{BackendError, Dimensions, ImageCodec};
use super::fonts::{FontFace, FontHandle};
use super::params::{Quality, Rect, Rgb};
use ab_glyph::PxScale;
use font8x8::UnicodeFonts;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output extensions with an encoder compiled in.
const OUTPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Built-in glyphs are 8x8 cells.
const GLYPH_CELL: u32 = 8;

/// Centered dot, used for the `•` separator that `font8x8` lacks.
const BULLET_GLYPH: [u8; 8] = [0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00];

/// Pure Rust codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn pixel(color: Rgb) -> image::Rgb<u8> {
    image::Rgb([color.0, color.1, color.2])
}

fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    OUTPUT_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, format)| *format)
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!("Unsupported output format: {ext:?}"))
        })
}

/// Side of one glyph pixel for the built-in face at `size_px`.
fn builtin_block(size_px: u32) -> u32 {
    (size_px / GLYPH_CELL).max(1)
}

fn builtin_glyph(ch: char) -> [u8; 8] {
    if ch == '•' {
        return BULLET_GLYPH;
    }
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::LATIN_FONTS.get(ch))
        .or_else(|| font8x8::BASIC_FONTS.get('?'))
        .unwrap_or_default()
}

fn draw_builtin_text(canvas: &mut RgbImage, text: &str, x: i32, y: i32, size_px: u32, color: Rgb) {
    let block = builtin_block(size_px);
    let color = pixel(color);
    for (index, ch) in text.chars().enumerate() {
        let cell_x = x + (index as u32 * GLYPH_CELL * block) as i32;
        for (row, bits) in builtin_glyph(ch).into_iter().enumerate() {
            for col in 0..GLYPH_CELL {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let rect = imageproc::rect::Rect::at(
                    cell_x + (col * block) as i32,
                    y + (row as u32 * block) as i32,
                )
                .of_size(block, block);
                draw_filled_rect_mut(canvas, rect, color);
            }
        }
    }
}

impl ImageCodec for RustBackend {
    type Image = RgbImage;

    fn open(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let image = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(image.to_rgb8())
    }

    fn decode_verify(&self, path: &Path) -> bool {
        let Ok(reader) = ImageReader::open(path).and_then(|r| r.with_guessed_format()) else {
            return false;
        };
        reader.format().is_some() && reader.into_dimensions().is_ok()
    }

    fn dimensions(&self, image: &RgbImage) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
        let format = output_format(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        let encoded = match format {
            ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut writer, quality.value() as u8)
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    ExtendedColorType::Rgb8,
                ),
            other => image.write_to(&mut writer, other),
        };
        encoded.map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        })?;
        writer.flush()?;
        Ok(())
    }

    fn new_canvas(&self, width: u32, height: u32, fill: Rgb) -> RgbImage {
        RgbImage::from_pixel(width, height, pixel(fill))
    }

    fn paste(&self, canvas: &mut RgbImage, source: &RgbImage, x: u32, y: u32) {
        image::imageops::replace(canvas, source, i64::from(x), i64::from(y));
    }

    fn draw_rect(&self, canvas: &mut RgbImage, rect: Rect, color: Rgb) {
        if rect.is_empty() {
            return;
        }
        let area = imageproc::rect::Rect::at(rect.x as i32, rect.y as i32)
            .of_size(rect.width, rect.height);
        draw_filled_rect_mut(canvas, area, pixel(color));
    }

    fn draw_ellipse(&self, canvas: &mut RgbImage, center: (i32, i32), radii: (u32, u32), color: Rgb) {
        if radii.0 == 0 || radii.1 == 0 {
            return;
        }
        draw_filled_ellipse_mut(canvas, center, radii.0 as i32, radii.1 as i32, pixel(color));
    }

    fn draw_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        x: i32,
        y: i32,
        font: &FontHandle,
        color: Rgb,
    ) -> u32 {
        match &font.face {
            FontFace::Outline(face) => {
                let scale = PxScale::from(font.size_px as f32);
                draw_text_mut(canvas, pixel(color), x, y, scale, face, text);
            }
            FontFace::Builtin => draw_builtin_text(canvas, text, x, y, font.size_px, color),
        }
        self.measure_text(text, font).1
    }

    fn measure_text(&self, text: &str, font: &FontHandle) -> (u32, u32) {
        match &font.face {
            FontFace::Outline(face) => text_size(PxScale::from(font.size_px as f32), face, text),
            FontFace::Builtin => {
                let block = builtin_block(font.size_px);
                let chars = text.chars().count() as u32;
                (chars * GLYPH_CELL * block, GLYPH_CELL * block)
            }
        }
    }
}
