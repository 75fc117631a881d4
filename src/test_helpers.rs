//! Shared test utilities for the exif-frame test suite.
//!
//! Provides synthetic image fixtures so tests never depend on files in the
//! repository: plain JPEGs, JPEGs carrying an EXIF block, and the SONY
//! sample tag set used across the reader and pipeline tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let photo = tmp.path().join("photo.jpg");
//! create_test_jpeg_with_exif(&photo, 120, 80, &sample_exif_fields());
//! ```

use exif::{Field, In, Rational, Tag, Value};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

// =========================================================================
// Image fixtures
// =========================================================================

/// A horizontal gradient, so a pasted image is distinguishable from a fill.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgb([r, g, 128])
    })
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    gradient_image(width, height)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Jpeg,
        )
        .unwrap();
    bytes
}

/// Write a plain JPEG with no metadata.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Write a JPEG whose APP1 segment holds `fields` as EXIF.
///
/// Segment layout, inserted straight after SOI:
///
/// ```text
/// FF E1 | len (u16 BE, includes itself) | "Exif\0\0" | TIFF bytes
/// ```
pub fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32, fields: &[Field]) {
    let mut writer = exif::experimental::Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = std::io::Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let jpeg = encode_jpeg(width, height);
    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// EXIF field builders
// =========================================================================

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn rational(tag: Tag, num: u32, denom: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![Rational { num, denom }]),
    }
}

/// The SONY A7C II sample: 70mm f/5.6 1/125s ISO200, shot 2024-12-09.
pub fn sample_exif_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "SONY"),
        ascii(Tag::Model, "ILCE-7CM2"),
        ascii(Tag::LensModel, "24-70mm F2.8 DG DN II | Art 024"),
        rational(Tag::FocalLength, 700, 10),
        rational(Tag::FNumber, 56, 10),
        rational(Tag::ExposureTime, 1, 125),
        Field {
            tag: Tag::PhotographicSensitivity,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![200]),
        },
        ascii(Tag::DateTimeOriginal, "2024:12:09 20:13:02"),
    ]
}
