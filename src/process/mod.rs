//! Process execution: typed command specs, run-to-completion helpers and
//! application spawning.
//!
//! Everything that touches the OS process table goes through the
//! [`ProcessRunner`] trait so the launch sequence can be tested without
//! real package managers.

pub mod command;
pub mod mock;
pub mod spawn;

pub use command::{
    execute, execute_streaming, CommandResult, CommandSpec, OutputCallback, OutputLine,
};
pub use mock::MockRunner;
pub use spawn::{
    spawn, wait_for_grace, ProcessHandle, ProcessState, SpawnMode, DEFAULT_GRACE_PERIOD,
};

use crate::error::Result;
use std::time::Duration;

/// Seam between the launch sequence and the operating system.
pub trait ProcessRunner {
    /// Run a command to completion.
    ///
    /// When `on_output` is given, output lines are streamed to it as they
    /// arrive; otherwise `spec.capture` decides between captured and
    /// inherited streams.
    fn execute(&self, spec: &CommandSpec, on_output: Option<OutputCallback>)
        -> Result<CommandResult>;

    /// Spawn the application and check it survives the grace period.
    fn spawn(&self, spec: &CommandSpec, mode: SpawnMode, grace: Duration)
        -> Result<ProcessHandle>;
}

/// [`ProcessRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn execute(
        &self,
        spec: &CommandSpec,
        on_output: Option<OutputCallback>,
    ) -> Result<CommandResult> {
        match on_output {
            Some(callback) => execute_streaming(spec, callback),
            None => execute(spec),
        }
    }

    fn spawn(
        &self,
        spec: &CommandSpec,
        mode: SpawnMode,
        grace: Duration,
    ) -> Result<ProcessHandle> {
        spawn(spec, mode, grace)
    }
}
