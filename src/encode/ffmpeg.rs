use std::path::{Path, PathBuf};

use crate::exec::{CommandSpec, Step, ensure_parent_dir};
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::job::FrameNaming;

/// Codec settings passed to `ffmpeg`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodeProfile {
    /// `-vcodec` value.
    pub codec: String,
    /// `-profile:v` value.
    pub profile: String,
    /// `-crf` value; 0 is lossless for libx264.
    pub crf: u8,
    /// `-preset` value.
    pub preset: String,
}

impl EncodeProfile {
    /// Lossless H.264 in 4:4:4, slowest preset.
    pub fn lossless() -> Self {
        Self {
            codec: "libx264".to_string(),
            profile: "high444".to_string(),
            crf: 0,
            preset: "veryslow".to_string(),
        }
    }
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self::lossless()
    }
}

/// Options for assembling a frame sequence into one video with the system `ffmpeg`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    /// Encoder executable.
    pub program: PathBuf,
    /// Directory holding the frame images.
    pub frames_dir: PathBuf,
    /// Naming of the frame images inside `frames_dir`.
    pub naming: FrameNaming,
    /// Playback rate of the output video.
    pub playback: Fps,
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Codec settings.
    pub profile: EncodeProfile,
}

impl EncodeOpts {
    /// Options with the default program (`ffmpeg`), naming and lossless profile.
    pub fn new(frames_dir: impl Into<PathBuf>, playback: Fps, out_path: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            frames_dir: frames_dir.into(),
            naming: FrameNaming::default(),
            playback,
            out_path: out_path.into(),
            overwrite: true,
            profile: EncodeProfile::default(),
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.playback.num, self.playback.den)?;
        self.naming.validate(0)?;
        if self.out_path.as_os_str().is_empty() {
            return Err(ReelError::validation("encode output path must be set"));
        }
        if self.profile.codec.is_empty() {
            return Err(ReelError::validation("encode codec must be set"));
        }
        Ok(())
    }

    /// Validate, create the output's parent directory, and refuse to clobber unless allowed.
    pub fn prepare(&self) -> ReelResult<()> {
        self.validate()?;
        ensure_parent_dir(&self.out_path)?;
        if !self.overwrite && self.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    /// Input pattern (`<frames_dir>/%05d.ppm`) handed to ffmpeg's image2 demuxer.
    pub fn input_pattern(&self) -> PathBuf {
        self.frames_dir.join(self.naming.pattern())
    }

    /// The full encoder command line.
    pub fn command(&self) -> CommandSpec {
        let cmd = CommandSpec::new(Step::Encode, &self.program)
            .arg(if self.overwrite { "-y" } else { "-n" });

        // `-r` before `-i` sets the image2 input rate, which becomes the playback rate.
        cmd.args([
            "-f",
            "image2",
            "-r",
            &self.playback.to_string(),
            "-i",
        ])
        .arg(self.input_pattern())
        .args([
            "-vcodec",
            &self.profile.codec,
            "-profile:v",
            &self.profile.profile,
            "-crf",
            &self.profile.crf.to_string(),
            "-preset",
            &self.profile.preset,
        ])
        .arg(&self.out_path)
    }
}

/// Return `true` when `program -version` runs successfully.
pub fn is_ffmpeg_on_path(program: &Path) -> bool {
    std::process::Command::new(program)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
