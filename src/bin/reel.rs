use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "reel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame with the ray tracer, then encode them with `ffmpeg`.
    Shoot(ShootArgs),
    /// Encode an existing frame directory only.
    Encode(EncodeArgs),
    /// Print the commands a shoot would run, without running them.
    Plan(ShootArgs),
}

#[derive(Args, Debug)]
struct ShootArgs {
    /// Built-in parameter set used for anything not given explicitly.
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,

    /// JSON config file layered over the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First tick (inclusive).
    #[arg(long)]
    start: Option<u64>,

    /// Last tick (exclusive).
    #[arg(long)]
    end: Option<u64>,

    /// Ticks per simulated second, `N` or `N/D`.
    #[arg(long)]
    framerate: Option<String>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Renderer samples per pixel.
    #[arg(long)]
    samples: Option<u32>,

    /// Video playback rate, `N` or `N/D`.
    #[arg(long)]
    playback: Option<String>,

    /// Directory for frame images.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output video path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Ray tracer executable.
    #[arg(long)]
    renderer: Option<PathBuf>,

    /// ffmpeg executable.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Stop at the first non-zero exit instead of warning and continuing.
    #[arg(long)]
    abort_on_failure: bool,

    /// Print commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Directory holding the frame images.
    #[arg(long, default_value = "movie")]
    frames_dir: PathBuf,

    /// Video playback rate, `N` or `N/D`.
    #[arg(long, default_value = "1/24")]
    playback: reel::Fps,

    /// Output video path.
    #[arg(long, default_value = "out.mp4")]
    out: PathBuf,

    /// ffmpeg executable.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Zero-padded width of frame indices.
    #[arg(long, default_value_t = 5)]
    digits: u8,

    /// Frame file extension.
    #[arg(long, default_value = "ppm")]
    extension: String,

    /// Refuse to replace an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// Print the command instead of running it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Draft,
    Final,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Shoot(args) => cmd_shoot(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn resolve_opts(args: &ShootArgs) -> anyhow::Result<reel::ShootOpts> {
    let mut layers = Vec::new();
    if let Some(path) = &args.config {
        layers.push(reel::ShootConfig::from_path(path)?);
    }

    let preset = args.preset.map(|p| match p {
        PresetChoice::Draft => reel::Preset::Draft,
        PresetChoice::Final => reel::Preset::Final,
    });
    layers.push(reel::ShootConfig {
        preset,
        start: args.start,
        end: args.end,
        framerate: args.framerate.clone().map(reel::RateValue::Text),
        width: args.width,
        height: args.height,
        samples: args.samples,
        playback: args.playback.clone().map(reel::RateValue::Text),
        out_dir: args.out_dir.clone(),
        video: args.out.clone(),
        renderer: args.renderer.clone(),
        ffmpeg: args.ffmpeg.clone(),
        policy: args.abort_on_failure.then_some(reel::FailurePolicy::Abort),
        ..reel::ShootConfig::default()
    });

    let opts = reel::ShootConfig::resolve(layers)
        .into_opts()
        .context("resolve shoot options")?;
    Ok(opts)
}

fn cmd_shoot(args: ShootArgs) -> anyhow::Result<()> {
    let mut opts = resolve_opts(&args)?;
    opts.verify_frames = !args.dry_run;
    let shoot = reel::Shoot::new(opts)?;

    let stats = if args.dry_run {
        let mut runner = reel::RecordingRunner::new();
        let stats = shoot.run(&mut runner)?;
        for cmd in runner.commands() {
            println!("{cmd}");
        }
        stats
    } else {
        shoot.prepare()?;
        if !reel::is_ffmpeg_on_path(&shoot.opts().ffmpeg) {
            tracing::warn!(
                ffmpeg = %shoot.opts().ffmpeg.display(),
                "ffmpeg was not found; frames will render but encoding will fail"
            );
        }
        shoot.run(&mut reel::ProcessRunner::new())?
    };

    if !stats.encoded {
        anyhow::bail!(
            "encoding '{}' failed ({} of {} frames failed to render)",
            shoot.opts().video_path.display(),
            stats.frames_failed,
            stats.frames_total
        );
    }
    if stats.frames_failed > 0 || stats.frames_missing > 0 {
        eprintln!(
            "wrote {} with problems: {} failed, {} missing",
            shoot.opts().video_path.display(),
            stats.frames_failed,
            stats.frames_missing
        );
    } else {
        eprintln!("wrote {}", shoot.opts().video_path.display());
    }
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let opts = reel::EncodeOpts {
        program: args.ffmpeg,
        frames_dir: args.frames_dir,
        naming: reel::FrameNaming {
            digits: args.digits,
            extension: args.extension,
        },
        playback: args.playback,
        out_path: args.out,
        overwrite: !args.no_overwrite,
        profile: reel::EncodeProfile::default(),
    };
    opts.validate()?;
    let cmd = opts.command();

    if args.dry_run {
        println!("{cmd}");
        return Ok(());
    }

    opts.prepare()?;
    let report = reel::CommandRunner::run(&mut reel::ProcessRunner::new(), &cmd)?;
    if !report.success {
        anyhow::bail!("ffmpeg failed: {}", report.status);
    }

    eprintln!("wrote {}", opts.out_path.display());
    Ok(())
}

fn cmd_plan(args: ShootArgs) -> anyhow::Result<()> {
    let opts = resolve_opts(&args)?;
    for cmd in opts.commands() {
        println!("{cmd}");
    }
    Ok(())
}
