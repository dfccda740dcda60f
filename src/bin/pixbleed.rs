use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pixbleed", version)]
struct Cli {
    /// Log per-frame progress to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Glitch a single image and write one PNG.
    Still(StillArgs),
    /// Write a PNG sequence (`frame_00000.png`, ...) into a directory.
    Frames(FramesArgs),
    /// Render a video or animated GIF (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Input image (animated GIFs are processed frame by frame).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; stale `frame_*.png` files are removed first.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    seq: SequenceArgs,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input image (animated GIFs are processed frame by frame).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.gif` selects an animated GIF, anything else h264 video.
    #[arg(long)]
    out: PathBuf,

    /// Output frames per second.
    #[arg(long, default_value_t = 12)]
    fps: u32,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    #[command(flatten)]
    seq: SequenceArgs,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Number of frames (defaults to the source frame count for animations, else 30).
    #[arg(long)]
    frames: Option<u32>,
}

#[derive(Args, Debug)]
struct EffectArgs {
    /// JSON preset with effect parameters; explicit flags override it.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Maximum displacement distance in pixels.
    #[arg(long)]
    max_offset: Option<u32>,

    /// Percent chance a block moves regardless of brightness.
    #[arg(long)]
    chance: Option<u32>,

    /// Blocks darker than this always move.
    #[arg(long)]
    tolerance: Option<u32>,

    /// Displacement axis.
    #[arg(long, value_enum)]
    axis: Option<AxisChoice>,

    /// Wrap displaced blocks around the image edges.
    #[arg(long)]
    wrap: bool,

    /// Block edge length in pixels.
    #[arg(long)]
    block_size: Option<u32>,

    /// Copy pixels (bleed) or swap them (diffuse).
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Accumulate damage across frames, or restart every frame from the source.
    #[arg(long, value_enum)]
    persistence: Option<PersistenceChoice>,

    /// Displacement passes per frame.
    #[arg(long, default_value_t = 1)]
    iterations: u32,

    /// Extra passes per consumed animation frame.
    #[arg(long, default_value_t = 0)]
    growth: u32,

    /// Base random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisChoice {
    X,
    Y,
    Both,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Bleed,
    Diffuse,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PersistenceChoice {
    Cumulative,
    Reset,
}

impl EffectArgs {
    fn resolve(&self) -> anyhow::Result<pixbleed::EffectParameters> {
        let mut p = match &self.params {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read params '{}'", path.display()))?;
                pixbleed::EffectParameters::from_json(&json)
                    .with_context(|| format!("parse params '{}'", path.display()))?
            }
            None => pixbleed::EffectParameters::default(),
        };

        if let Some(v) = self.max_offset {
            p.max_offset = v;
        }
        if let Some(v) = self.chance {
            p.trigger_chance = v;
        }
        if let Some(v) = self.tolerance {
            p.brightness_tolerance = v;
        }
        if let Some(v) = self.axis {
            p.axis_mode = match v {
                AxisChoice::X => pixbleed::AxisMode::X,
                AxisChoice::Y => pixbleed::AxisMode::Y,
                AxisChoice::Both => pixbleed::AxisMode::Both,
            };
        }
        if self.wrap {
            p.wrap = true;
        }
        if let Some(v) = self.block_size {
            p.block_size = v;
        }
        if let Some(v) = self.mode {
            p.transfer_mode = match v {
                ModeChoice::Bleed => pixbleed::TransferMode::Copy,
                ModeChoice::Diffuse => pixbleed::TransferMode::Swap,
            };
        }
        if let Some(v) = self.persistence {
            p.persistence = match v {
                PersistenceChoice::Cumulative => pixbleed::Persistence::Cumulative,
                PersistenceChoice::Reset => pixbleed::Persistence::ResetEachFrame,
            };
        }
        Ok(p.clamped())
    }

    fn spec(&self, frame_count: u32) -> pixbleed::SequenceSpec {
        pixbleed::SequenceSpec {
            frame_count,
            per_frame_iterations: self.iterations,
            iteration_growth: self.growth,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<pixbleed::Source> {
    let bytes = std::fs::read(path).with_context(|| format!("open image '{}'", path.display()))?;
    let mut frames =
        pixbleed::decode_frames(&bytes).with_context(|| format!("decode '{}'", path.display()))?;
    if frames.len() == 1 {
        Ok(pixbleed::Source::Still(frames.remove(0)))
    } else {
        Ok(pixbleed::Source::Timeline(frames))
    }
}

fn default_frame_count(source: &pixbleed::Source, requested: Option<u32>) -> u32 {
    match (requested, source) {
        (Some(n), _) => n,
        (None, pixbleed::Source::Timeline(frames)) => frames.len() as u32,
        (None, pixbleed::Source::Still(_)) => 30,
    }
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let params = args.effect.resolve()?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?;
    let original = pixbleed::decode_image(&bytes)
        .with_context(|| format!("decode '{}'", args.in_path.display()))?;

    let mut sink = pixbleed::InMemorySink::new();
    pixbleed::run_sequence(
        pixbleed::Source::Still(original),
        params,
        args.effect.spec(1),
        &mut sink,
    )?;
    let frame = sink
        .into_frames()
        .pop()
        .context("sequence produced no frame")?;

    pixbleed::ensure_parent_dir(&args.out)?;
    let png = pixbleed::encode_png(&frame.buffer)?;
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let params = args.effect.resolve()?;
    let source = read_source(&args.in_path)?;
    let frame_count = default_frame_count(&source, args.seq.frames);

    let mut sink = pixbleed::PngSequenceSink::new(&args.out_dir);
    let stats = pixbleed::run_sequence(source, params, args.effect.spec(frame_count), &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = args.effect.resolve()?;
    let source = read_source(&args.in_path)?;
    let frame_count = default_frame_count(&source, args.seq.frames);

    let opts = pixbleed::FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: !args.no_overwrite,
        fps: pixbleed::Fps::new(args.fps, 1)?,
        bg_rgb: [0, 0, 0],
    };
    let mut sink = pixbleed::FfmpegSink::new(opts);
    pixbleed::run_sequence(source, params, args.effect.spec(frame_count), &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
