//! Component file verification.

use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::UserInterface;

use super::installer::run_install;

/// Component paths (relative to `root`) that do not exist.
pub fn missing_components(root: &Path, components: &[PathBuf]) -> Vec<PathBuf> {
    components
        .iter()
        .filter(|c| !root.join(c).exists())
        .cloned()
        .collect()
}

/// Check that every component file exists.
///
/// When some are missing each is reported, `aux_install` is run (if given)
/// and `VerificationIncomplete` is returned. A failing `aux_install` is only
/// a warning.
pub fn verify_components(
    root: &Path,
    components: &[PathBuf],
    aux_install: Option<&CommandSpec>,
    runner: &dyn ProcessRunner,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let missing = missing_components(root, components);
    if missing.is_empty() {
        ui.success("Resource limiter components verified");
        return Ok(());
    }

    ui.warning("Some resource limiter components are missing:");
    for path in &missing {
        ui.warning(&format!("  - {}", path.display()));
    }

    if let Some(install) = aux_install {
        ui.info("Installing additional dependencies for resource limiters...");
        if let Err(e) = run_install(install, "resource limiter dependencies", runner, ui) {
            tracing::debug!("auxiliary install failed: {}", e);
            ui.warning(&e.to_string());
        }
    }

    Err(LauncherError::VerificationIncomplete { missing })
}

/// `<package manager> install --save <packages>` in `root`, or `None` when
/// there is nothing to install.
pub fn aux_install_command(
    package_manager: &str,
    root: &Path,
    packages: &[String],
) -> Option<CommandSpec> {
    if packages.is_empty() {
        return None;
    }
    Some(
        CommandSpec::new(package_manager)
            .args(["install", "--save"])
            .args(packages.iter().cloned())
            .current_dir(root),
    )
}
