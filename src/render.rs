use std::path::PathBuf;

use crate::exec::{CommandSpec, Step};
use crate::foundation::core::{Resolution, format_secs};
use crate::foundation::error::{ReelError, ReelResult};
use crate::job::FrameJob;

/// Default renderer location, relative to the working directory.
pub const DEFAULT_RENDERER: &str = "./target/release/ray-trace";

/// How to invoke the external ray tracer for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererOpts {
    /// Renderer executable.
    pub program: PathBuf,
    /// Output image size.
    pub resolution: Resolution,
    /// Samples per pixel; omitted from the command line when `None`.
    pub samples: Option<u32>,
}

impl RendererOpts {
    pub fn validate(&self) -> ReelResult<()> {
        if self.program.as_os_str().is_empty() {
            return Err(ReelError::validation("renderer program must be set"));
        }
        Resolution::new(self.resolution.width, self.resolution.height)?;
        if self.samples == Some(0) {
            return Err(ReelError::validation("renderer samples must be > 0"));
        }
        Ok(())
    }

    /// `<renderer> -t <secs> -f <path> -x <width> -y <height> [-s <samples>]`
    pub fn command(&self, job: &FrameJob) -> CommandSpec {
        let cmd = CommandSpec::new(Step::Render, &self.program)
            .args(["-t", &format_secs(job.secs)])
            .arg("-f")
            .arg(&job.path)
            .args([
                "-x",
                &self.resolution.width.to_string(),
                "-y",
                &self.resolution.height.to_string(),
            ]);
        match self.samples {
            Some(s) => cmd.args(["-s", &s.to_string()]),
            None => cmd,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
