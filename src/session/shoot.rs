use std::path::PathBuf;

use crate::encode::ffmpeg::{EncodeOpts, EncodeProfile};
use crate::exec::{CommandRunner, CommandSpec, ensure_dir};
use crate::foundation::core::{Fps, Framerate, TickRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::job::{FrameJob, FrameNaming, plan_jobs};
use crate::render::RendererOpts;
use crate::session::progress::Progress;

/// What to do when an external tool exits unsuccessfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log a warning and keep going.
    #[default]
    Warn,
    /// Stop at the first failure.
    Abort,
}

/// Everything a shoot needs: which ticks, how to render them, how to encode the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShootOpts {
    /// Raw ticks to render, `[start, end)`.
    pub range: TickRange,
    /// Ticks per simulated second.
    pub framerate: Framerate,
    /// Frame file naming inside `out_dir`.
    pub naming: FrameNaming,
    /// Directory the renderer writes frames to.
    pub out_dir: PathBuf,
    /// Renderer invocation.
    pub renderer: RendererOpts,
    /// Encoder executable.
    pub ffmpeg: PathBuf,
    /// Playback rate of the encoded video.
    pub playback: Fps,
    /// Encoded video path.
    pub video_path: PathBuf,
    /// Codec settings.
    pub profile: EncodeProfile,
    /// Reaction to non-zero exits.
    pub policy: FailurePolicy,
    /// Warn when a frame file is absent after a successful render.
    pub verify_frames: bool,
}

impl ShootOpts {
    pub fn validate(&self) -> ReelResult<()> {
        if self.range.is_empty() {
            return Err(ReelError::validation("tick range must be non-empty (start < end)"));
        }
        Framerate::new(self.framerate.num, self.framerate.den)?;
        self.naming.validate(self.range.len_frames())?;
        self.renderer.validate()?;
        self.encode_opts().validate()?;
        Ok(())
    }

    /// Encoder options reading this shoot's frame sequence.
    pub fn encode_opts(&self) -> EncodeOpts {
        EncodeOpts {
            program: self.ffmpeg.clone(),
            frames_dir: self.out_dir.clone(),
            naming: self.naming.clone(),
            playback: self.playback,
            out_path: self.video_path.clone(),
            overwrite: true,
            profile: self.profile.clone(),
        }
    }

    /// Frame jobs in render order.
    pub fn jobs(&self) -> impl Iterator<Item = FrameJob> + '_ {
        plan_jobs(self.range, self.framerate, &self.naming, &self.out_dir)
    }

    /// Every command a shoot runs, renderer calls first, encoder last.
    pub fn commands(&self) -> impl Iterator<Item = CommandSpec> + '_ {
        self.jobs()
            .map(|job| self.renderer.command(&job))
            .chain(std::iter::once_with(|| self.encode_opts().command()))
    }
}

/// Outcome of a finished shoot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShootStats {
    /// Renderer invocations.
    pub frames_total: u64,
    /// Renderer invocations that exited unsuccessfully.
    pub frames_failed: u64,
    /// Successful renders whose frame file was not found afterwards.
    pub frames_missing: u64,
    /// `true` when the encoder exited successfully.
    pub encoded: bool,
}

/// Renders every frame of a tick range one after another, then encodes them once.
#[derive(Debug)]
pub struct Shoot {
    opts: ShootOpts,
}

impl Shoot {
    pub fn new(opts: ShootOpts) -> ReelResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &ShootOpts {
        &self.opts
    }

    /// Create the frame directory and the video's parent directory.
    pub fn prepare(&self) -> ReelResult<()> {
        ensure_dir(&self.opts.out_dir)?;
        self.opts.encode_opts().prepare()
    }

    /// Run the shoot. Each command finishes before the next one starts.
    #[tracing::instrument(skip_all, fields(
        start = self.opts.range.start.0,
        end = self.opts.range.end.0,
        framerate = %self.opts.framerate,
    ))]
    pub fn run<R: CommandRunner + ?Sized>(&self, runner: &mut R) -> ReelResult<ShootStats> {
        let opts = &self.opts;
        let mut stats = ShootStats {
            frames_total: opts.range.len_frames(),
            ..ShootStats::default()
        };
        let mut progress = Progress::new(stats.frames_total);

        tracing::info!(
            frames = stats.frames_total,
            out_dir = %opts.out_dir.display(),
            resolution = %opts.renderer.resolution,
            "shooting"
        );

        for job in opts.jobs() {
            let cmd = opts.renderer.command(&job);
            let report = runner.run(&cmd)?;
            if !report.success {
                let msg = format!(
                    "renderer failed for frame {} (t={}): {}",
                    job.index.0, job.secs, report.status
                );
                match opts.policy {
                    FailurePolicy::Abort => return Err(ReelError::render(msg)),
                    FailurePolicy::Warn => {
                        tracing::warn!("{msg}");
                        stats.frames_failed += 1;
                    }
                }
            } else if opts.verify_frames && !job.path.exists() {
                tracing::warn!(
                    path = %job.path.display(),
                    "renderer exited successfully but frame file is missing"
                );
                stats.frames_missing += 1;
            }
            progress.frame_done();
        }

        let cmd = opts.encode_opts().command();
        tracing::info!(video = %opts.video_path.display(), playback = %opts.playback, "encoding");
        let report = runner.run(&cmd)?;
        if report.success {
            stats.encoded = true;
        } else {
            let msg = format!("encoder failed: {}", report.status);
            match opts.policy {
                FailurePolicy::Abort => return Err(ReelError::encode(msg)),
                FailurePolicy::Warn => tracing::warn!("{msg}"),
            }
        }

        tracing::info!(
            frames = stats.frames_total,
            failed = stats.frames_failed,
            missing = stats.frames_missing,
            encoded = stats.encoded,
            "shoot finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/shoot.rs"]
mod tests;
