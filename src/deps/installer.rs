//! Marker-directory installs.
//!
//! A dependency set counts as installed when its marker directory exists.
//! Otherwise its install command is run once; a non-zero exit aborts the
//! launch with [`LauncherError::InstallFailed`].

use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::{live_output_callback, UserInterface};

/// Number of trailing output lines shown under an install spinner.
const LIVE_OUTPUT_LINES: usize = 2;

/// What `ensure_installed` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Marker was present; nothing ran.
    AlreadyInstalled,
    /// Install command ran and succeeded.
    Installed,
    /// Management of this dependency set is turned off.
    Skipped,
}

/// A set of dependencies guarded by a marker directory.
#[derive(Debug, Clone)]
pub struct DependencySet {
    /// Human-readable name, e.g. "Node.js dependencies".
    pub name: String,
    /// Directory whose existence means "installed".
    pub marker: PathBuf,
    /// Command that creates the marker.
    pub install: CommandSpec,
}

impl DependencySet {
    /// Node dependencies: `<package manager> install` in the project root.
    pub fn node(package_manager: &str, project_root: &Path, deps_dir: &Path) -> Self {
        Self {
            name: "Node.js dependencies".to_string(),
            marker: deps_dir.to_path_buf(),
            install: CommandSpec::new(package_manager)
                .arg("install")
                .current_dir(project_root),
        }
    }

    /// Install if the marker is missing.
    pub fn ensure(
        &self,
        runner: &dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        if self.marker.exists() {
            ui.info(&format!("{} already installed", self.name));
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        ui.warning(&format!(
            "{} not found, installing...",
            self.marker
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| self.name.clone())
        ));
        ensure_installed(&self.marker, &self.install, &self.name, runner, ui)
    }
}

/// Run `install` unless `marker_dir` already exists.
pub fn ensure_installed(
    marker_dir: &Path,
    install: &CommandSpec,
    label: &str,
    runner: &dyn ProcessRunner,
    ui: &mut dyn UserInterface,
) -> Result<InstallOutcome> {
    if marker_dir.exists() {
        tracing::debug!("marker {} present, skipping install", marker_dir.display());
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    run_install(install, label, runner, ui)?;

    if !marker_dir.exists() {
        tracing::warn!(
            "{} finished but {} still does not exist",
            install.display(),
            marker_dir.display()
        );
    }
    Ok(InstallOutcome::Installed)
}

/// Run one install command with output handling suited to the UI mode.
///
/// Verbose mode hands the terminal to the command. Otherwise output is
/// captured, shown live under a spinner when the UI has one, and printed in
/// an error block on failure.
pub fn run_install(
    install: &CommandSpec,
    label: &str,
    runner: &dyn ProcessRunner,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let command = install.display();
    tracing::debug!("installing {}: {}", label, command);

    if ui.output_mode().shows_command_output() {
        ui.info(&format!("Running {}", command));
        let result = runner.execute(&install.clone().capture_output(false), None)?;
        if !result.success {
            ui.error(&format!("Failed to install {}", label));
            return Err(LauncherError::InstallFailed {
                command,
                exit_code: result.exit_code,
            });
        }
        ui.success(&format!("{} installed successfully", label));
        return Ok(());
    }

    let base_message = format!("Installing {}...", label);
    let mut spinner = ui.start_spinner(&base_message);
    let callback = spinner
        .progress_bar()
        .map(|bar| live_output_callback(bar, base_message.clone(), LIVE_OUTPUT_LINES));

    let result = match runner.execute(&install.clone().capture_output(true), callback) {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_error(&format!("Failed to install {}", label));
            return Err(e);
        }
    };

    if result.success {
        spinner.finish_success(&format!("{} installed successfully", label));
        Ok(())
    } else {
        spinner.finish_error(&format!("Failed to install {}", label));
        let output = if result.stderr.trim().is_empty() {
            &result.stdout
        } else {
            &result.stderr
        };
        ui.show_error_block(&command, output);
        Err(LauncherError::InstallFailed {
            command,
            exit_code: result.exit_code,
        })
    }
}
