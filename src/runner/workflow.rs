//! Launch sequencing.
//!
//! [`Launcher`] walks a [`LaunchRequest`] through the launch states:
//!
//! ```text
//! Idle -> DependenciesChecked -> ConfigVerified -> Done            (verify)
//!                                              -> Building -> Done (build)
//!                                              -> Starting -> Running | Done
//! ```
//!
//! Dependency installs, the build and the spawn are essential and abort the
//! launch. Configuration defaults and component verification are best-effort
//! and only produce warnings.

use std::fmt;
use std::path::PathBuf;

use crate::config::{
    create_if_missing, ensure_defaults, read_record, LauncherSettings, ProjectLayout,
};
use crate::deps::{
    aux_install_command, ensure_python_env, reset_environment, verify_components, DependencySet,
};
use crate::error::{LauncherError, Result};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::UserInterface;

use super::request::{BuildPlatform, LaunchAction, LaunchRequest, RunMode};

/// Environment variable telling the application which mode it runs in.
pub const ENV_DEV_MODE: &str = "BROWSER_DEV_MODE";
/// Environment variable enabling debug output in development mode.
pub const ENV_DEBUG: &str = "DEBUG";

/// Position of a launch in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    DependenciesChecked,
    ConfigVerified,
    Building,
    Starting,
    /// The application is alive and no longer supervised.
    Running,
    Done,
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::DependenciesChecked => "dependencies-checked",
            Self::ConfigVerified => "config-verified",
            Self::Building => "building",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a completed launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Terminal state reached.
    pub state: LaunchState,
    /// Exit code for the launcher process.
    pub exit_code: i32,
    /// Pid of the spawned application, if one was spawned.
    pub pid: Option<u32>,
    /// Directories removed by `--reset`.
    pub removed: Vec<PathBuf>,
}

/// Drives one launch against a project.
pub struct Launcher<'a> {
    settings: &'a LauncherSettings,
    layout: ProjectLayout,
    runner: &'a dyn ProcessRunner,
    state: LaunchState,
}

impl<'a> Launcher<'a> {
    /// Create a launcher for the project at `layout.root`.
    pub fn new(
        settings: &'a LauncherSettings,
        layout: ProjectLayout,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            settings,
            layout,
            runner,
            state: LaunchState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Run the full launch sequence for `request`.
    pub fn run(
        &mut self,
        request: &LaunchRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<LaunchOutcome> {
        let removed = if request.reset {
            self.reset(ui)?
        } else {
            Vec::new()
        };

        self.check_dependencies(ui)?;
        self.verify_config(ui);
        self.check_components(ui)?;

        let (exit_code, pid) = match request.action {
            LaunchAction::Verify => {
                ui.success("Verification completed");
                self.transition(LaunchState::Done);
                (0, None)
            }
            LaunchAction::Build(platform) => {
                self.build(platform, ui)?;
                (0, None)
            }
            LaunchAction::Start => self.start(request, ui)?,
        };

        Ok(LaunchOutcome {
            state: self.state,
            exit_code,
            pid,
            removed,
        })
    }

    /// The command that starts the application for `request`.
    pub fn app_command(&self, request: &LaunchRequest) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.settings.package_manager)
            .args(["run", request.mode.run_target()])
            .current_dir(&self.layout.root)
            .envs(self.settings.env.clone())
            .env(ENV_DEV_MODE, request.mode.dev_flag());
        if request.mode == RunMode::Dev {
            spec = spec.env(ENV_DEBUG, "1");
        }
        spec
    }

    fn transition(&mut self, next: LaunchState) {
        tracing::debug!("launch state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn reset(&self, ui: &mut dyn UserInterface) -> Result<Vec<PathBuf>> {
        ui.warning("Resetting environment as requested...");
        let removed =
            reset_environment(&[self.layout.venv_dir.clone(), self.layout.deps_dir.clone()])?;
        for dir in &removed {
            ui.info(&format!("Removed {}", dir.display()));
        }
        Ok(removed)
    }

    fn check_dependencies(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        ensure_python_env(&self.settings.python, &self.layout, self.runner, ui)?;

        DependencySet::node(
            &self.settings.package_manager,
            &self.layout.root,
            &self.layout.deps_dir,
        )
        .ensure(self.runner, ui)?;

        self.transition(LaunchState::DependenciesChecked);
        Ok(())
    }

    fn verify_config(&mut self, ui: &mut dyn UserInterface) {
        let path = &self.layout.package_file;
        let result = create_if_missing(path).and_then(|created| {
            if created {
                ui.warning(&format!("{} not found, created it", path.display()));
            }
            ensure_defaults(path)
        });

        match result.and_then(|_| read_record(path)) {
            Ok(record) => ui.success(&format!(
                "Ollama configured: using {} model at {}",
                record.model,
                record.address()
            )),
            Err(e) => {
                tracing::debug!("configuration check failed: {}", e);
                ui.warning(&e.to_string());
                ui.warning("Ollama configuration issues detected");
            }
        }

        self.transition(LaunchState::ConfigVerified);
    }

    fn check_components(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let aux = aux_install_command(
            &self.settings.package_manager,
            &self.layout.root,
            &self.settings.aux_packages,
        );

        match verify_components(
            &self.layout.root,
            &self.settings.components,
            aux.as_ref(),
            self.runner,
            ui,
        ) {
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::debug!("component verification incomplete: {}", e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn build(&mut self, platform: BuildPlatform, ui: &mut dyn UserInterface) -> Result<()> {
        self.transition(LaunchState::Building);
        ui.info(&format!("Building packages for {}...", platform));

        let spec = CommandSpec::new(&self.settings.package_manager)
            .args(["run".to_string(), platform.build_target()])
            .current_dir(&self.layout.root);
        let result = self.runner.execute(&spec, None)?;

        if !result.success {
            return Err(LauncherError::BuildFailed {
                platform: platform.to_string(),
                exit_code: result.exit_code,
            });
        }

        ui.success(&format!("Build for {} completed successfully", platform));
        self.transition(LaunchState::Done);
        Ok(())
    }

    fn start(
        &mut self,
        request: &LaunchRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<(i32, Option<u32>)> {
        self.transition(LaunchState::Starting);

        ui.info(&format!("Mode: {}", request.mode.label()));
        ui.info(&format!("Platform: {}", std::env::consts::OS));
        ui.info("Resource limiters: Enabled");
        ui.warning("[ALPHA TEST VERSION] Please report any issues or feedback");
        ui.info("Use the limiter settings panel to manage system resources");

        let spec = self.app_command(request);
        ui.info(&format!("Running {}", spec.display()));

        let handle = self
            .runner
            .spawn(&spec, request.spawn_mode, self.settings.grace_period())?;

        if handle.is_running() {
            ui.success(&format!(
                "Internet Server Browser is running (PID {})",
                handle.pid
            ));
            self.transition(LaunchState::Running);
            return Ok((0, Some(handle.pid)));
        }

        self.transition(LaunchState::Done);
        if handle.succeeded() {
            ui.success("Internet Server Browser exited");
            return Ok((0, Some(handle.pid)));
        }
        match handle.exit_code() {
            Some(code) => ui.error(&format!("Browser exited with code {}", code)),
            None => ui.error("Browser was terminated by a signal"),
        }
        Ok((1, Some(handle.pid)))
    }
}
