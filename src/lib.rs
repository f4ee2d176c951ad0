//! reel renders a tick range frame by frame with an external ray tracer, then assembles the
//! frames into one video with `ffmpeg`.
//!
//! - Describe the shoot with [`ShootOpts`] (directly, or via [`ShootConfig`] presets and files)
//! - Create a [`Shoot`]
//! - Run it with a [`CommandRunner`]: [`ProcessRunner`] for real, [`RecordingRunner`] to preview
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod encode;
pub mod exec;
pub mod job;
pub mod render;
pub mod session;

pub use crate::foundation::core::{
    Fps, FrameIndex, Framerate, Resolution, Tick, TickRange, format_secs,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::config::{Preset, RateValue, ShootConfig};
pub use crate::encode::ffmpeg::{EncodeOpts, EncodeProfile, is_ffmpeg_on_path};
pub use crate::exec::{CommandRunner, CommandSpec, ExitReport, ProcessRunner, RecordingRunner, Step};
pub use crate::job::{FrameJob, FrameNaming, plan_jobs};
pub use crate::render::{DEFAULT_RENDERER, RendererOpts};
pub use crate::session::progress::{Progress, ProgressSnapshot};
pub use crate::session::shoot::{FailurePolicy, Shoot, ShootOpts, ShootStats};
