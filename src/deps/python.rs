//! Python virtual environment management.

use std::path::{Path, PathBuf};

use crate::config::{ProjectLayout, PythonSettings};
use crate::error::Result;
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::UserInterface;

use super::installer::{run_install, InstallOutcome};

/// Path of the virtual environment's pip executable.
pub fn venv_pip(venv_dir: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        venv_dir.join("Scripts").join("pip")
    } else {
        venv_dir.join("bin").join("pip")
    }
}

/// Create the virtual environment and install its packages, unless it
/// already exists.
///
/// If creation or package installation fails the half-built environment is
/// removed so the next run starts over instead of treating it as installed.
pub fn ensure_python_env(
    settings: &PythonSettings,
    layout: &ProjectLayout,
    runner: &dyn ProcessRunner,
    ui: &mut dyn UserInterface,
) -> Result<InstallOutcome> {
    if !settings.enabled {
        tracing::debug!("python environment management disabled");
        return Ok(InstallOutcome::Skipped);
    }

    let venv_dir = &layout.venv_dir;
    if venv_dir.exists() {
        ui.info(&format!(
            "Virtual environment already exists at {}",
            venv_dir.display()
        ));
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    let create = CommandSpec::new(&settings.interpreter)
        .args(["-m", "venv"])
        .arg(venv_dir.to_string_lossy())
        .current_dir(&layout.root);
    if let Err(e) = run_install(&create, "Python virtual environment", runner, ui) {
        discard_venv(venv_dir);
        return Err(e);
    }

    if settings.packages.is_empty() {
        return Ok(InstallOutcome::Installed);
    }

    let pip_install = CommandSpec::new(venv_pip(venv_dir).to_string_lossy())
        .arg("install")
        .args(settings.packages.iter().cloned())
        .current_dir(&layout.root);

    if let Err(e) = run_install(&pip_install, "Python dependencies", runner, ui) {
        discard_venv(venv_dir);
        return Err(e);
    }

    Ok(InstallOutcome::Installed)
}

fn discard_venv(venv_dir: &Path) {
    match std::fs::remove_dir_all(venv_dir) {
        Ok(()) => tracing::debug!("removed incomplete {}", venv_dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("could not remove {}: {}", venv_dir.display(), e),
    }
}
