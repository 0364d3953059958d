//! Error types for launcher operations.
//!
//! This module defines [`LauncherError`], the primary error type used
//! throughout the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Essential steps (install, build, spawn) return errors that abort the run
//! - Best-effort steps (config defaults, component verification) return
//!   errors that callers downgrade to warnings
//! - Use `anyhow::Error` (via `LauncherError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for launcher operations.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The JSON configuration document does not exist.
    #[error("Configuration not found: {path}")]
    ConfigMissing { path: PathBuf },

    /// The JSON configuration document is not valid JSON.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The document parsed, but its shape cannot hold the record.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// The launcher settings file is not valid YAML or has bad values.
    #[error("Failed to parse launcher settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// An install command exited unsuccessfully.
    #[error("Install failed with exit code {exit_code:?}: {command}")]
    InstallFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// The platform build target exited unsuccessfully.
    #[error("Build for '{platform}' failed with exit code {exit_code:?}")]
    BuildFailed {
        platform: String,
        exit_code: Option<i32>,
    },

    /// The application exited inside the startup grace period.
    #[error("Process terminated unexpectedly with exit code {exit_code:?}")]
    ProcessDiedImmediately { exit_code: Option<i32> },

    /// A command could not be started at all.
    #[error("Failed to start '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// `--build` was given a platform outside the supported set.
    #[error("Invalid platform: {name} (expected one of: win, linux)")]
    InvalidPlatform { name: String },

    /// Some expected component files are missing.
    #[error("{} component file(s) missing", missing.len())]
    VerificationIncomplete { missing: Vec<PathBuf> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Whether this error should abort the launch.
    ///
    /// Best-effort steps produce non-fatal errors, which are reported as
    /// warnings and the run continues.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::ConfigMissing { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigInvalid { .. }
                | Self::VerificationIncomplete { .. }
        )
    }
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
