use std::process::{Command, Stdio};

use crate::exec::{CommandRunner, CommandSpec, ExitReport};
use crate::foundation::error::{ReelError, ReelResult};

/// Runs each command as a blocking child process.
///
/// Child stdout/stderr are inherited unless `quiet` is set, so renderer and encoder output
/// reaches the terminal the driver runs in.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    /// Discard child stdout/stderr.
    pub quiet: bool,
}

impl ProcessRunner {
    /// Runner with inherited stdio.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandRunner for ProcessRunner {
    #[tracing::instrument(level = "debug", skip_all, fields(program = %cmd.program.display()))]
    fn run(&mut self, cmd: &CommandSpec) -> ReelResult<ExitReport> {
        let mut child = Command::new(&cmd.program);
        child.args(&cmd.args).stdin(Stdio::null());
        if self.quiet {
            child.stdout(Stdio::null()).stderr(Stdio::null());
        }

        tracing::debug!(command = %cmd, "spawning");
        let status = child.status().map_err(|e| {
            ReelError::spawn(format!(
                "failed to run '{}' (is it installed and on PATH?): {e}",
                cmd.program.display()
            ))
        })?;
        Ok(status.into())
    }
}
