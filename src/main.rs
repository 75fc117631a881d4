use clap::Parser;
use exif_frame::config::{self, CliOverrides, Layout, Style, Theme};
use exif_frame::imaging::{ExifReader, RustBackend, SystemFontProvider};
use exif_frame::process::{self, ProcessError};
use exif_frame::{naming, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "exif-frame")]
#[command(about = "Create instant-camera style frames for digital photos using EXIF metadata")]
#[command(long_about = "\
Create instant-camera style frames for digital photos using EXIF metadata

The camera, lens and exposure settings embedded in the photo are printed on a
border below it (or, with --cinema-bars, in letterbox bars over it).

Layouts:

  compact   image edge to edge, metadata strip at the bottom,
            camera on the left, settings on the right
  full      border on all sides, metadata centered below the image

Settings are read from exif-frame.toml next to the image (or --config),
and flags override the file. Run 'exif-frame --gen-config' for a documented
config file.")]
#[command(version)]
struct Cli {
    /// Path to the image file to process
    #[arg(required_unless_present = "gen_config")]
    input: Option<PathBuf>,

    /// Output file path (default: input with _framed before the extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame style (reserved, both render the same frame)
    #[arg(short, long, value_enum)]
    style: Option<Style>,

    /// Print settings and extracted metadata, and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// JPEG output quality, 1-100 [default: 95]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Font size scale factor, 0.5-3.0 [default: 1.3]
    #[arg(long)]
    font_scale: Option<f64>,

    /// Border color scheme [default: black]
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Frame layout [default: compact]
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Paint letterbox bars over the image instead of adding a border
    #[arg(long)]
    cinema_bars: bool,

    /// Letterbox target ratio, width / height [default: 2.39]
    #[arg(long)]
    aspect_ratio: Option<f64>,

    /// Config file (default: exif-frame.toml next to the input image)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock exif-frame.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Print the computed frame plan as JSON instead of writing an image
    #[arg(long)]
    print_plan: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            style: self.style,
            theme: self.theme,
            layout: self.layout,
            font_scale: self.font_scale,
            quality: self.quality,
            cinema_bars: self.cinema_bars.then_some(true),
            aspect_ratio: self.aspect_ratio,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,exif_frame=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        eprintln!("\n{}", output::format_cancelled());
        std::process::exit(output::CANCELLED_EXIT_CODE);
    });
    if let Err(e) = result {
        log::warn!("Cannot install the Ctrl-C handler: {e}");
    }
}

fn run(cli: &Cli) -> Result<(), ProcessError> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let input = cli.input.clone().unwrap_or_default();
    let codec = RustBackend::new();
    process::verify_input(&codec, &input)?;

    let config_file = config::find_config_file(cli.config.as_deref(), &input);
    let config = config::load_config(config_file.as_deref(), &cli.overrides())?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| naming::derive_output_path(&input));

    let metadata = process::read_metadata(&ExifReader, &input);

    if cli.print_plan {
        let plan = process::plan_file(&codec, &input, &metadata, &config.frame)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if cli.verbose {
        output::print_settings_summary(&input, &output_path, &config.frame);
        output::print_metadata_summary(&metadata);
    }

    let fonts = SystemFontProvider::new(&config.fonts);
    process::frame_image(&codec, &fonts, &input, &output_path, &metadata, &config.frame)?;
    output::print_success(&output_path);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    install_interrupt_handler();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
