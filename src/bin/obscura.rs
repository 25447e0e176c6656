use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "obscura", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived per-layer styles as JSON.
    Styles(StylesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a frame sequence as numbered PNGs.
    Seq(SeqArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct ExposureArgs {
    /// Sensor sensitivity, 100..=1600.
    #[arg(long, default_value_t = 400)]
    iso: u32,

    /// Focus distance in meters, 1..=10.
    #[arg(long, default_value_t = 3.0)]
    focus: f64,

    /// Shutter speed in seconds, 0.01..=1.
    #[arg(long, default_value_t = 0.01)]
    shutter: f64,

    /// Aperture f-stop, 1.4..=16.
    #[arg(long, default_value_t = 2.8)]
    aperture: f64,
}

impl ExposureArgs {
    fn to_params(self) -> anyhow::Result<obscura::ExposureParams> {
        let params = obscura::ExposureParams {
            iso: self.iso,
            focus_m: self.focus,
            shutter_secs: self.shutter,
            aperture_f: self.aperture,
        };
        params.validate().context("exposure parameters")?;
        Ok(params)
    }
}

#[derive(Parser, Debug)]
struct StylesArgs {
    #[command(flatten)]
    exposure: ExposureArgs,

    /// Elapsed 1-second sway ticks (0 = subject at rest).
    #[arg(long, default_value_t = 0)]
    ticks: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    exposure: ExposureArgs,

    /// Background image (PNG/JPEG).
    #[arg(long)]
    background: PathBuf,

    /// Subject image (PNG/JPEG).
    #[arg(long)]
    subject: PathBuf,

    /// Elapsed 1-second sway ticks (0 = subject at rest).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SeqArgs {
    #[command(flatten)]
    exposure: ExposureArgs,

    /// Background image (PNG/JPEG).
    #[arg(long)]
    background: PathBuf,

    /// Subject image (PNG/JPEG).
    #[arg(long)]
    subject: PathBuf,

    /// Sequence duration in whole seconds.
    #[arg(long, default_value_t = 4)]
    secs: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Output directory; frames land as frame_0000.png, frame_0001.png, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Styles(args) => cmd_styles(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Seq(args) => cmd_seq(args),
    }
}

fn subject_state(ticks: u64) -> obscura::SubjectState {
    obscura::SubjectState::default()
        .with_offset(obscura::SubjectOscillator::offset_after_ticks(ticks))
}

fn cmd_styles(args: StylesArgs) -> anyhow::Result<()> {
    let params = args.exposure.to_params()?;
    let styles = obscura::eval_frame(&params, &subject_state(args.ticks));
    println!("{}", serde_json::to_string_pretty(&styles)?);
    Ok(())
}

fn load_scene(
    background: &Path,
    subject: &Path,
) -> anyhow::Result<(obscura::PreparedImage, obscura::PreparedImage, obscura::Canvas)> {
    let bg = obscura::assets::load_image(background)?;
    let subj = obscura::assets::load_image(subject)?;
    // The background defines the stage, as in the original shell.
    let canvas = obscura::Canvas::new(bg.width, bg.height)?;
    Ok((bg, subj, canvas))
}

fn write_png(path: &Path, frame: &obscura::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = args.exposure.to_params()?;
    let (bg, subj, canvas) = load_scene(&args.background, &args.subject)?;

    let frame = obscura::render_frame(canvas, &bg, &subj, &params, &subject_state(args.ticks))?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_seq(args: SeqArgs) -> anyhow::Result<()> {
    let params = args.exposure.to_params()?;
    let (bg, subj, canvas) = load_scene(&args.background, &args.subject)?;
    let fps = obscura::Fps::new(args.fps, 1)?;

    let total_frames = u64::from(args.secs) * u64::from(args.fps);
    for f in 0..total_frames {
        // The sway oscillator advances once per whole elapsed second.
        let ticks = fps.whole_secs_elapsed(f);
        let frame = obscura::render_frame(canvas, &bg, &subj, &params, &subject_state(ticks))?;
        let path = args.out_dir.join(format!("frame_{f:04}.png"));
        write_png(&path, &frame)?;
    }

    eprintln!("wrote {total_frames} frames to {}", args.out_dir.display());
    Ok(())
}
