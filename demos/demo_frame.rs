//! Paints a synthetic landscape, then frames it in every layout.
//!
//! ```sh
//! cargo run --example demo_frame -- /tmp/frames
//! ```
//!
//! Writes `demo_photo.jpg` plus one framed variant per layout into the given
//! directory (default: the current directory).

use exif_frame::config::{FontConfig, FrameConfig, Layout, Theme};
use exif_frame::imaging::{ImageCodec, Rect, Rgb, RustBackend, SystemFontProvider, generate_frame};
use exif_frame::metadata::Metadata;
use std::error::Error;
use std::path::PathBuf;

fn sample_metadata() -> Metadata {
    Metadata {
        camera_make: Some("SONY".into()),
        camera_model: Some("ILCE-7CM2".into()),
        lens_model: Some("24-70mm F2.8 DG DN II | Art 024".into()),
        focal_length: Some("70mm".into()),
        aperture: Some("5.6".into()),
        shutter_speed: Some("1/125".into()),
        iso: Some("200".into()),
        capture_timestamp: Some("2024:12:09 20:13:02".into()),
    }
}

fn paint_photo(codec: &RustBackend) -> image::RgbImage {
    let (width, height) = (1200, 800);
    let mut photo = codec.new_canvas(width, height, Rgb(90, 140, 200));
    let ground = Rect {
        x: 0,
        y: height * 2 / 3,
        width,
        height: height / 3,
    };
    codec.draw_rect(&mut photo, ground, Rgb(60, 110, 60));
    codec.draw_ellipse(&mut photo, (900, 200), (80, 80), Rgb(250, 210, 90));
    photo
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let codec = RustBackend::new();
    let fonts = SystemFontProvider::new(&FontConfig::default());
    let metadata = sample_metadata();

    let photo = paint_photo(&codec);
    let photo_path = out_dir.join("demo_photo.jpg");
    codec.save(&photo, &photo_path, Default::default())?;
    println!("Wrote {}", photo_path.display());

    let variants = [
        ("compact", FrameConfig::default()),
        (
            "full_white",
            FrameConfig {
                layout: Layout::Full,
                theme: Theme::White,
                ..FrameConfig::default()
            },
        ),
        (
            "cinema",
            FrameConfig {
                cinema_bars: true,
                ..FrameConfig::default()
            },
        ),
    ];

    for (name, config) in variants {
        let framed = generate_frame(&codec, &fonts, &photo, &metadata, &config);
        let path = out_dir.join(format!("demo_framed_{name}.jpg"));
        codec.save(&framed, &path, config.quality)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
