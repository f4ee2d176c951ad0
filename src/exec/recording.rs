use std::collections::BTreeSet;

use crate::exec::{CommandRunner, CommandSpec, ExitReport, Step};
use crate::foundation::error::ReelResult;

/// Records commands instead of running them.
///
/// Every call succeeds unless its 0-based call position was registered with
/// [`RecordingRunner::fail_call`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Vec<CommandSpec>,
    failing_calls: BTreeSet<usize>,
}

impl RecordingRunner {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report exit code 1 for the `call`-th invocation.
    pub fn fail_call(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    /// Commands in invocation order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Commands of one step, in invocation order.
    pub fn step(&self, step: Step) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().filter(move |c| c.step == step)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, cmd: &CommandSpec) -> ReelResult<ExitReport> {
        let call = self.commands.len();
        self.commands.push(cmd.clone());
        if self.failing_calls.contains(&call) {
            Ok(ExitReport::failed(1))
        } else {
            Ok(ExitReport::ok())
        }
    }
}
