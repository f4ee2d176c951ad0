//! External program invocation.
//!
//! Renderer and encoder steps only build [`CommandSpec`]s; a [`CommandRunner`] decides how they
//! are executed.

/// Blocking child-process runner.
pub mod process;
/// In-memory runner for dry runs and tests.
pub mod recording;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::foundation::error::ReelResult;

pub use process::ProcessRunner;
pub use recording::RecordingRunner;

/// Which pipeline step a command belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// One renderer invocation.
    Render,
    /// The final encoder invocation.
    Encode,
}

/// A program and its argument vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    /// Pipeline step this command implements.
    pub step: Step,
    /// Program path or name resolved through `PATH`.
    pub program: PathBuf,
    /// Arguments, without the program itself.
    pub args: Vec<OsString>,
}

impl CommandSpec {
    /// Start a command for `program`.
    pub fn new(step: Step, program: impl Into<PathBuf>) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Arguments as UTF-8 strings (lossy), for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Value following the flag `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<String> {
        let args = self.args_lossy();
        let pos = args.iter().position(|a| a == flag)?;
        args.get(pos + 1).cloned()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for a in &self.args {
            write!(f, " {}", shell_quote(&a.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+%,".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Outcome of one finished command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitReport {
    /// `true` when the program exited successfully.
    pub success: bool,
    /// Exit code, when the platform reports one.
    pub code: Option<i32>,
    /// Human-readable status for logs.
    pub status: String,
}

impl ExitReport {
    /// A successful exit with code 0.
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            status: "exit status: 0".to_string(),
        }
    }

    /// A failed exit with `code`.
    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
            status: format!("exit status: {code}"),
        }
    }
}

impl From<std::process::ExitStatus> for ExitReport {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
            status: status.to_string(),
        }
    }
}

/// Executes commands one at a time; `run` returns only after the command has finished.
pub trait CommandRunner {
    /// Run `cmd` to completion.
    fn run(&mut self, cmd: &CommandSpec) -> ReelResult<ExitReport>;
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Ensure `dir` exists.
pub fn ensure_dir(dir: &Path) -> ReelResult<()> {
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/exec/command.rs"]
mod tests;
