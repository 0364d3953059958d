//! Application spawning with a startup liveness check.
//!
//! A freshly spawned child is polled for a short grace period. A child that
//! is gone by the end of it is reported as [`LauncherError::ProcessDiedImmediately`];
//! a child that is still alive is either left running (detached) or waited
//! on (blocking).

use crate::error::{LauncherError, Result};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::CommandSpec;

/// Default startup grace period.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the launcher relates to the spawned child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnMode {
    /// Child gets its own session and outlives the launcher.
    #[default]
    Detached,
    /// Child shares the launcher's terminal; the launcher waits for it.
    Blocking,
}

/// What the launcher knows about the child once `spawn` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Alive at the end of the grace period and no longer supervised.
    Running,
    /// Exited; carries the exit code (None if killed by a signal).
    Exited(Option<i32>),
}

/// Handle describing a spawned application process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    /// OS process id.
    pub pid: u32,
    /// Observed state.
    pub state: ProcessState,
}

impl ProcessHandle {
    /// Whether the process was still alive when last observed.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    /// Exit code, if the process has exited.
    pub fn exit_code(&self) -> Option<i32> {
        match self.state {
            ProcessState::Running => None,
            ProcessState::Exited(code) => code,
        }
    }

    /// True when the process is running or exited with code 0.
    pub fn succeeded(&self) -> bool {
        match self.state {
            ProcessState::Running => true,
            ProcessState::Exited(code) => code == Some(0),
        }
    }
}

/// Spawn `spec` and check that it survives the grace period.
///
/// In [`SpawnMode::Detached`] any exit inside the grace period is a failure.
/// In [`SpawnMode::Blocking`] only a non-zero exit inside the grace period is;
/// otherwise the call waits for the child and returns its exit code.
pub fn spawn(spec: &CommandSpec, mode: SpawnMode, grace: Duration) -> Result<ProcessHandle> {
    let mut cmd = spec.to_command();
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    match mode {
        SpawnMode::Detached => {
            cmd.stdin(Stdio::null());
            detach(&mut cmd);
        }
        SpawnMode::Blocking => {
            cmd.stdin(Stdio::inherit());
        }
    }

    let mut child = cmd.spawn().map_err(|e| spec.spawn_error(e))?;
    let pid = child.id();
    tracing::debug!(pid, ?mode, "spawned {}", spec.display());

    if let Some(status) = wait_for_grace(&mut child, grace)? {
        tracing::debug!(pid, code = ?status.code(), "exited during grace period");
        if mode == SpawnMode::Detached || !status.success() {
            return Err(LauncherError::ProcessDiedImmediately {
                exit_code: status.code(),
            });
        }
        return Ok(ProcessHandle {
            pid,
            state: ProcessState::Exited(status.code()),
        });
    }

    match mode {
        // Dropping `child` neither kills nor reaps it.
        SpawnMode::Detached => Ok(ProcessHandle {
            pid,
            state: ProcessState::Running,
        }),
        SpawnMode::Blocking => {
            let status = child.wait()?;
            Ok(ProcessHandle {
                pid,
                state: ProcessState::Exited(status.code()),
            })
        }
    }
}

/// Poll `child` until it exits or `grace` elapses.
///
/// Returns the exit status if the child exited in time, `None` if it is
/// still running.
pub fn wait_for_grace(child: &mut Child, grace: Duration) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + grace;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Put the child in its own session so terminal signals aimed at the
/// launcher do not reach it.
#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: setsid() is async-signal-safe and only affects the child
    // between fork and exec.
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}
