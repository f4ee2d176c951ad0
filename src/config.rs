//! Shoot configuration: built-in presets, JSON config files, and layering between them.
//!
//! Values are resolved as preset, then config file, then explicit overrides (CLI flags), with
//! later layers winning field by field.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::EncodeProfile;
use crate::foundation::core::{Fps, Framerate, Resolution, Tick, TickRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::job::FrameNaming;
use crate::render::{DEFAULT_RENDERER, RendererOpts};
use crate::session::shoot::{FailurePolicy, ShootOpts};

/// Built-in parameter sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Low-resolution preview: one frame per tick, slowed 24x on playback.
    #[default]
    Draft,
    /// Full-resolution, 24 ticks per second, real-time playback.
    Final,
}

impl Preset {
    /// Fully populated configuration for this preset.
    pub fn config(self) -> ShootConfig {
        let (framerate, width, height, samples, playback) = match self {
            Preset::Draft => (1, 60, 40, None, RateValue::Ratio { num: 1, den: 24 }),
            Preset::Final => (24, 1200, 800, Some(100), RateValue::Whole(24)),
        };
        ShootConfig {
            preset: Some(self),
            start: Some(3620 * u64::from(framerate)),
            end: Some(4500 * u64::from(framerate)),
            framerate: Some(RateValue::Whole(framerate)),
            width: Some(width),
            height: Some(height),
            samples,
            playback: Some(playback),
            out_dir: Some(PathBuf::from("movie")),
            video: Some(PathBuf::from("out.mp4")),
            renderer: Some(PathBuf::from(DEFAULT_RENDERER)),
            ffmpeg: Some(PathBuf::from("ffmpeg")),
            digits: Some(5),
            extension: Some("ppm".to_string()),
            profile: Some(EncodeProfile::lossless()),
            policy: Some(FailurePolicy::Warn),
        }
    }
}

/// A rate written as `24`, `"1/24"`, or `{ "num": 1, "den": 24 }`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    /// Whole units per second.
    Whole(u32),
    /// `N` or `N/D` text.
    Text(String),
    /// Explicit rational.
    Ratio {
        /// Numerator.
        num: u32,
        /// Denominator.
        den: u32,
    },
}

impl RateValue {
    fn parts(&self) -> ReelResult<(u32, u32)> {
        match self {
            RateValue::Whole(n) => Ok((*n, 1)),
            RateValue::Text(s) => {
                let fps: Fps = s.parse()?;
                Ok((fps.num, fps.den))
            }
            RateValue::Ratio { num, den } => Ok((*num, *den)),
        }
    }

    pub fn to_framerate(&self) -> ReelResult<Framerate> {
        let (num, den) = self.parts()?;
        Framerate::new(num, den)
    }

    pub fn to_fps(&self) -> ReelResult<Fps> {
        let (num, den) = self.parts()?;
        Fps::new(num, den)
    }
}

/// One configuration layer. Unset fields fall through to the layer below.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShootConfig {
    /// Base preset for fields this layer leaves unset.
    pub preset: Option<Preset>,
    /// First tick (inclusive).
    pub start: Option<u64>,
    /// Last tick (exclusive).
    pub end: Option<u64>,
    /// Ticks per simulated second.
    pub framerate: Option<RateValue>,
    /// Image width in pixels.
    pub width: Option<u32>,
    /// Image height in pixels.
    pub height: Option<u32>,
    /// Renderer samples per pixel.
    pub samples: Option<u32>,
    /// Playback rate of the encoded video.
    pub playback: Option<RateValue>,
    /// Frame directory.
    pub out_dir: Option<PathBuf>,
    /// Encoded video path.
    pub video: Option<PathBuf>,
    /// Renderer executable.
    pub renderer: Option<PathBuf>,
    /// Encoder executable.
    pub ffmpeg: Option<PathBuf>,
    /// Zero-padded width of frame indices.
    pub digits: Option<u8>,
    /// Frame file extension.
    pub extension: Option<String>,
    /// Codec settings.
    pub profile: Option<EncodeProfile>,
    /// Reaction to non-zero tool exits.
    pub policy: Option<FailurePolicy>,
}

impl ShootConfig {
    /// Parse a configuration layer from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse shoot config JSON: {e}")))
    }

    /// Parse a configuration layer from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open shoot config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Overlay `top` on `self`; every field set in `top` wins.
    pub fn merge(self, top: ShootConfig) -> ShootConfig {
        ShootConfig {
            preset: top.preset.or(self.preset),
            start: top.start.or(self.start),
            end: top.end.or(self.end),
            framerate: top.framerate.or(self.framerate),
            width: top.width.or(self.width),
            height: top.height.or(self.height),
            samples: top.samples.or(self.samples),
            playback: top.playback.or(self.playback),
            out_dir: top.out_dir.or(self.out_dir),
            video: top.video.or(self.video),
            renderer: top.renderer.or(self.renderer),
            ffmpeg: top.ffmpeg.or(self.ffmpeg),
            digits: top.digits.or(self.digits),
            extension: top.extension.or(self.extension),
            profile: top.profile.or(self.profile),
            policy: top.policy.or(self.policy),
        }
    }

    /// Resolve layers: the preset named by the top-most layer (default [`Preset::Draft`]),
    /// then each layer in order.
    pub fn resolve(layers: impl IntoIterator<Item = ShootConfig>) -> ShootConfig {
        let layers: Vec<_> = layers.into_iter().collect();
        let preset = layers
            .iter()
            .rev()
            .find_map(|l| l.preset)
            .unwrap_or_default();
        layers
            .into_iter()
            .fold(preset.config(), |acc, layer| acc.merge(layer))
    }

    /// Build validated shoot options. Every required field must be set.
    pub fn into_opts(self) -> ReelResult<ShootOpts> {
        fn req<T>(v: Option<T>, name: &str) -> ReelResult<T> {
            v.ok_or_else(|| ReelError::validation(format!("shoot config is missing '{name}'")))
        }

        let start = req(self.start, "start")?;
        let end = req(self.end, "end")?;
        if start >= end {
            return Err(ReelError::validation(format!(
                "start tick ({start}) must be < end tick ({end})"
            )));
        }

        let opts = ShootOpts {
            range: TickRange::new(Tick(start), Tick(end))?,
            framerate: req(self.framerate, "framerate")?.to_framerate()?,
            naming: FrameNaming {
                digits: req(self.digits, "digits")?,
                extension: req(self.extension, "extension")?,
            },
            out_dir: req(self.out_dir, "out_dir")?,
            renderer: RendererOpts {
                program: req(self.renderer, "renderer")?,
                resolution: Resolution::new(req(self.width, "width")?, req(self.height, "height")?)?,
                samples: self.samples,
            },
            ffmpeg: req(self.ffmpeg, "ffmpeg")?,
            playback: req(self.playback, "playback")?.to_fps()?,
            video_path: req(self.video, "video")?,
            profile: self.profile.unwrap_or_default(),
            policy: self.policy.unwrap_or_default(),
            verify_frames: true,
        };
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
