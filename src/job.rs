use std::path::{Path, PathBuf};

use crate::foundation::core::{FrameIndex, Framerate, Tick, TickRange};
use crate::foundation::error::{ReelError, ReelResult};

/// Fixed-width, zero-padded frame file naming (`00042.ppm`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameNaming {
    /// Zero-padded width of the index.
    pub digits: u8,
    /// File extension without the leading dot.
    pub extension: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            digits: 5,
            extension: "ppm".to_string(),
        }
    }
}

impl FrameNaming {
    /// Reject naming that cannot be expressed or cannot hold `frames` distinct names.
    pub fn validate(&self, frames: u64) -> ReelResult<()> {
        if self.digits == 0 {
            return Err(ReelError::validation("frame naming digits must be > 0"));
        }
        if self.extension.is_empty() || self.extension.contains(['/', '\\', '%']) {
            return Err(ReelError::validation(format!(
                "invalid frame file extension '{}'",
                self.extension
            )));
        }
        if let Some(cap) = self.capacity()
            && frames > cap
        {
            return Err(ReelError::validation(format!(
                "{frames} frames do not fit {}-digit frame names (max {cap})",
                self.digits
            )));
        }
        Ok(())
    }

    /// Number of distinct names, `None` when it exceeds `u64`.
    pub fn capacity(&self) -> Option<u64> {
        10u64.checked_pow(u32::from(self.digits))
    }

    /// File name of the frame at `idx`.
    pub fn file_name(&self, idx: FrameIndex) -> String {
        format!(
            "{:0width$}.{}",
            idx.0,
            self.extension,
            width = usize::from(self.digits)
        )
    }

    /// printf-style pattern matching every file produced by [`FrameNaming::file_name`].
    pub fn pattern(&self) -> String {
        format!("%0{}d.{}", self.digits, self.extension)
    }
}

/// One unit of work: render the frame at `index` for simulated time `secs`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameJob {
    /// Output position.
    pub index: FrameIndex,
    /// Raw tick.
    pub tick: Tick,
    /// Simulated timestamp in seconds.
    pub secs: f64,
    /// Image path the renderer writes.
    pub path: PathBuf,
}

/// Enumerate the jobs for `range` in ascending index order.
pub fn plan_jobs<'a>(
    range: TickRange,
    rate: Framerate,
    naming: &'a FrameNaming,
    out_dir: &'a Path,
) -> impl Iterator<Item = FrameJob> + 'a {
    range.frames().map(move |(index, tick)| FrameJob {
        index,
        tick,
        secs: rate.secs_at(tick),
        path: out_dir.join(naming.file_name(index)),
    })
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
