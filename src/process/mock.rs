//! Scriptable [`ProcessRunner`] for tests.
//!
//! `MockRunner` records every command it is asked to run and answers with
//! pre-configured exit codes, output lines and filesystem side effects.
//!
//! # Example
//!
//! ```
//! use isb_launcher::process::{CommandSpec, MockRunner, ProcessRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.fail_with("npm install", 1);
//!
//! let result = runner
//!     .execute(&CommandSpec::new("npm").arg("install"), None)
//!     .unwrap();
//! assert_eq!(result.exit_code, Some(1));
//! assert_eq!(runner.executed_commands(), vec!["npm install".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LauncherError, Result};

use super::{
    CommandResult, CommandSpec, OutputCallback, OutputLine, ProcessHandle, ProcessRunner,
    ProcessState, SpawnMode,
};

/// Pid reported for every mock spawn.
pub const MOCK_PID: u32 = 4242;

/// Mock process runner. Commands are matched by their display string.
#[derive(Debug, Default)]
pub struct MockRunner {
    executed: RefCell<Vec<CommandSpec>>,
    spawned: RefCell<Vec<(CommandSpec, SpawnMode, Duration)>>,
    exit_codes: HashMap<String, i32>,
    outputs: HashMap<String, Vec<OutputLine>>,
    creates: HashMap<String, Vec<PathBuf>>,
    spawn_outcome: Option<SpawnOutcome>,
}

#[derive(Debug, Clone, Copy)]
enum SpawnOutcome {
    Exits(Option<i32>),
    Dies(Option<i32>),
}

impl MockRunner {
    /// Create a runner where every command succeeds and spawns stay alive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` exit with `code`.
    pub fn fail_with(&mut self, command: &str, code: i32) {
        self.exit_codes.insert(command.to_string(), code);
    }

    /// Emit `lines` on stdout when `command` runs.
    pub fn emit(&mut self, command: &str, lines: &[&str]) {
        self.outputs.insert(
            command.to_string(),
            lines
                .iter()
                .map(|l| OutputLine::Stdout(l.to_string()))
                .collect(),
        );
    }

    /// Create `dir` when `command` runs successfully, the way an installer
    /// creates its output directory.
    pub fn creates_dir(&mut self, command: &str, dir: impl Into<PathBuf>) {
        self.creates
            .entry(command.to_string())
            .or_default()
            .push(dir.into());
    }

    /// Make the spawned application exit with `code` after the grace period.
    pub fn spawn_exits(&mut self, code: Option<i32>) {
        self.spawn_outcome = Some(SpawnOutcome::Exits(code));
    }

    /// Make the spawned application die inside the grace period.
    pub fn spawn_dies(&mut self, code: Option<i32>) {
        self.spawn_outcome = Some(SpawnOutcome::Dies(code));
    }

    /// All specs passed to `execute`, in order.
    pub fn executed(&self) -> Vec<CommandSpec> {
        self.executed.borrow().clone()
    }

    /// Display strings of all executed commands, in order.
    pub fn executed_commands(&self) -> Vec<String> {
        self.executed.borrow().iter().map(|s| s.display()).collect()
    }

    /// All specs passed to `spawn`, with their mode and grace period.
    pub fn spawned(&self) -> Vec<(CommandSpec, SpawnMode, Duration)> {
        self.spawned.borrow().clone()
    }

    /// Whether nothing at all was run or spawned.
    pub fn is_untouched(&self) -> bool {
        self.executed.borrow().is_empty() && self.spawned.borrow().is_empty()
    }
}

impl ProcessRunner for MockRunner {
    fn execute(
        &self,
        spec: &CommandSpec,
        on_output: Option<OutputCallback>,
    ) -> Result<CommandResult> {
        let key = spec.display();
        self.executed.borrow_mut().push(spec.clone());

        let lines = self.outputs.get(&key).cloned().unwrap_or_default();
        let stdout: String = lines
            .iter()
            .filter_map(|l| match l {
                OutputLine::Stdout(s) => Some(format!("{}\n", s)),
                OutputLine::Stderr(_) => None,
            })
            .collect();
        if let Some(callback) = on_output {
            for line in lines {
                callback(line);
            }
        }

        let code = self.exit_codes.get(&key).copied().unwrap_or(0);
        if code != 0 {
            return Ok(CommandResult::failure(
                Some(code),
                stdout,
                format!("{} failed\n", key),
                Duration::ZERO,
            ));
        }

        for dir in self.creates.get(&key).into_iter().flatten() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
    }

    fn spawn(
        &self,
        spec: &CommandSpec,
        mode: SpawnMode,
        grace: Duration,
    ) -> Result<ProcessHandle> {
        self.spawned.borrow_mut().push((spec.clone(), mode, grace));

        let state = match self.spawn_outcome {
            Some(SpawnOutcome::Dies(exit_code)) => {
                return Err(LauncherError::ProcessDiedImmediately { exit_code })
            }
            Some(SpawnOutcome::Exits(code)) => ProcessState::Exited(code),
            None if mode == SpawnMode::Blocking => ProcessState::Exited(Some(0)),
            None => ProcessState::Running,
        };
        Ok(ProcessHandle {
            pid: MOCK_PID,
            state,
        })
    }
}
