//! Launch command implementation.
//!
//! Prepares the project and then verifies, builds or starts the browser
//! depending on the flags.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::LauncherSettings;
use crate::error::Result;
use crate::process::{ProcessRunner, SystemRunner};
use crate::runner::{LaunchAction, Launcher};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const BANNER_TITLE: &str = "Internet Server Browser";
const BANNER_SUBTITLE: &str = "Cross-platform Electron-based browser with Windows XP aesthetics";

/// The launch command implementation.
pub struct LaunchCommand {
    project_root: PathBuf,
    cli: Cli,
    runner: Box<dyn ProcessRunner>,
}

impl LaunchCommand {
    /// Create a new launch command backed by real processes.
    pub fn new(project_root: &Path, cli: Cli) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            cli,
            runner: Box::new(SystemRunner),
        }
    }

    /// Use `runner` instead of real processes.
    pub fn with_runner(mut self, runner: Box<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for LaunchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = match self.cli.launch_request() {
            Ok(request) => request,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };
        tracing::debug!("launch request: {:?}", request);

        let settings = LauncherSettings::load(&self.project_root, self.cli.settings.as_deref())?;

        ui.show_banner(BANNER_TITLE, BANNER_SUBTITLE, env!("CARGO_PKG_VERSION"));
        if ui.output_mode() == crate::ui::OutputMode::Verbose {
            ui.message(&format!("Project: {}", self.project_root.display()));
        }

        let layout = settings.layout(&self.project_root);
        let mut launcher = Launcher::new(&settings, layout, self.runner.as_ref());

        match launcher.run(&request, ui) {
            Ok(outcome) => {
                tracing::debug!("launch finished in state {}", outcome.state);
                Ok(CommandResult::from_exit_code(outcome.exit_code))
            }
            Err(e) => {
                tracing::debug!("launch failed in state {}: {:?}", launcher.state(), e);
                ui.error(&e.to_string());
                if let LaunchAction::Build(_) = request.action {
                    ui.error("Build failed");
                }
                Ok(CommandResult::failure(1))
            }
        }
    }
}
