//! Launch requests built from command-line flags.

use std::fmt;
use std::str::FromStr;

use crate::error::{LauncherError, Result};
use crate::process::SpawnMode;

/// Application run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Normal,
    Dev,
}

impl RunMode {
    /// Package script that starts the application in this mode.
    pub fn run_target(&self) -> &'static str {
        match self {
            Self::Normal => "start",
            Self::Dev => "dev",
        }
    }

    /// Value of `BROWSER_DEV_MODE` passed to the child.
    pub fn dev_flag(&self) -> &'static str {
        match self {
            Self::Normal => "0",
            Self::Dev => "1",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Dev => "Development",
        }
    }
}

/// Supported build platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPlatform {
    Win,
    Linux,
}

impl BuildPlatform {
    pub const ALL: [BuildPlatform; 2] = [BuildPlatform::Win, BuildPlatform::Linux];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Linux => "linux",
        }
    }

    /// Package script that builds for this platform, e.g. `build:win`.
    pub fn build_target(&self) -> String {
        format!("build:{}", self.as_str())
    }
}

impl fmt::Display for BuildPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildPlatform {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| LauncherError::InvalidPlatform {
                name: s.to_string(),
            })
    }
}

/// What the launcher does once the environment is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchAction {
    /// Spawn the application.
    #[default]
    Start,
    /// Run the platform build script.
    Build(BuildPlatform),
    /// Stop after preparing the environment.
    Verify,
}

/// A single launcher invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchRequest {
    pub mode: RunMode,
    pub action: LaunchAction,
    /// Remove installed environments first.
    pub reset: bool,
    pub spawn_mode: SpawnMode,
}

impl LaunchRequest {
    /// Build a request from raw flag values.
    ///
    /// A `build` platform is validated even when `verify` wins, so a bad
    /// platform is rejected before anything runs. `verify` takes precedence
    /// over `build`, which takes precedence over starting.
    pub fn from_flags(
        dev: bool,
        build: Option<&str>,
        verify: bool,
        reset: bool,
        foreground: bool,
    ) -> Result<Self> {
        let platform = build.map(BuildPlatform::from_str).transpose()?;

        let action = match (verify, platform) {
            (true, _) => LaunchAction::Verify,
            (false, Some(platform)) => LaunchAction::Build(platform),
            (false, None) => LaunchAction::Start,
        };

        Ok(Self {
            mode: if dev { RunMode::Dev } else { RunMode::Normal },
            action,
            reset,
            spawn_mode: if foreground {
                SpawnMode::Blocking
            } else {
                SpawnMode::Detached
            },
        })
    }
}
