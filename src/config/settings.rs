//! Launcher settings.
//!
//! Settings come from three layers, lowest priority first:
//! 1. Built-in defaults
//! 2. The optional YAML settings file (`.isb-launcher.yml` in the project root)
//! 3. `ISB_*` environment variables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{LauncherError, Result};
use crate::process::DEFAULT_GRACE_PERIOD;

/// Default settings file name, relative to the project root.
pub const SETTINGS_FILE: &str = ".isb-launcher.yml";

/// Environment variable overriding the package manager program.
pub const ENV_PACKAGE_MANAGER: &str = "ISB_PACKAGE_MANAGER";
/// Environment variable overriding the grace period, in milliseconds.
pub const ENV_GRACE_PERIOD_MS: &str = "ISB_GRACE_PERIOD_MS";
/// Environment variable overriding the Python interpreter.
pub const ENV_PYTHON: &str = "ISB_PYTHON";
/// Environment variable that disables virtual environment management.
pub const ENV_SKIP_PYTHON: &str = "ISB_SKIP_PYTHON";

/// Root settings structure for `.isb-launcher.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSettings {
    /// Package manager program used for install, build and run targets.
    pub package_manager: String,

    /// JSON document holding the Ollama record.
    pub package_file: PathBuf,

    /// Directory whose existence means Node dependencies are installed.
    pub deps_dir: PathBuf,

    /// Startup grace period in milliseconds.
    pub grace_period_ms: u64,

    /// Python virtual environment management.
    pub python: PythonSettings,

    /// Component files that must exist under the project root.
    pub components: Vec<PathBuf>,

    /// Packages installed with `--save` when components are missing.
    pub aux_packages: Vec<String>,

    /// Extra environment variables passed to the application.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Python virtual environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PythonSettings {
    /// Whether the launcher creates and populates a virtual environment.
    pub enabled: bool,

    /// Interpreter used to create the environment.
    pub interpreter: String,

    /// Virtual environment directory (also its marker).
    pub venv_dir: PathBuf,

    /// Packages installed with the environment's pip after creation.
    pub packages: Vec<String>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager().to_string(),
            package_file: PathBuf::from("package.json"),
            deps_dir: PathBuf::from("node_modules"),
            grace_period_ms: DEFAULT_GRACE_PERIOD.as_millis() as u64,
            python: PythonSettings::default(),
            components: [
                "src/limiters/limiter-manager.js",
                "src/limiters/cpu-limiter.js",
                "src/limiters/memory-limiter.js",
                "src/limiters/network-throttler.js",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            aux_packages: ["pidusage", "throttle", "http-proxy"]
                .into_iter()
                .map(String::from)
                .collect(),
            env: BTreeMap::new(),
        }
    }
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interpreter: default_interpreter().to_string(),
            venv_dir: PathBuf::from(".venv"),
            packages: ["electron-python", "requests", "psutil"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

fn default_package_manager() -> &'static str {
    if cfg!(target_os = "windows") {
        "npm.cmd"
    } else {
        "npm"
    }
}

fn default_interpreter() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

impl LauncherSettings {
    /// Load settings for `project_root`.
    ///
    /// With `explicit`, that file must exist. Without it, the default
    /// settings file is used when present and built-in defaults otherwise.
    /// Environment overrides are applied last.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(LauncherError::SettingsParseError {
                        path: path.to_path_buf(),
                        message: "file not found".to_string(),
                    });
                }
                Self::load_file(path)?
            }
            None => {
                let path = project_root.join(SETTINGS_FILE);
                if path.exists() {
                    Self::load_file(&path)?
                } else {
                    tracing::debug!("no settings file at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse a YAML settings file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| LauncherError::SettingsParseError {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse YAML settings text. An empty document yields the defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply `ISB_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pm) = lookup(ENV_PACKAGE_MANAGER).filter(|v| !v.is_empty()) {
            tracing::debug!("{} overrides package manager: {}", ENV_PACKAGE_MANAGER, pm);
            self.package_manager = pm;
        }

        if let Some(raw) = lookup(ENV_GRACE_PERIOD_MS) {
            self.grace_period_ms =
                raw.trim()
                    .parse()
                    .map_err(|_| LauncherError::SettingsParseError {
                        path: PathBuf::from(ENV_GRACE_PERIOD_MS),
                        message: format!("expected milliseconds, got '{}'", raw),
                    })?;
        }

        if let Some(python) = lookup(ENV_PYTHON).filter(|v| !v.is_empty()) {
            self.python.interpreter = python;
        }

        if lookup(ENV_SKIP_PYTHON).is_some() {
            self.python.enabled = false;
        }

        Ok(())
    }

    /// Startup grace period.
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    /// Resolve the configured paths against `project_root`.
    pub fn layout(&self, project_root: &Path) -> ProjectLayout {
        ProjectLayout {
            root: project_root.to_path_buf(),
            package_file: project_root.join(&self.package_file),
            deps_dir: project_root.join(&self.deps_dir),
            venv_dir: project_root.join(&self.python.venv_dir),
        }
    }
}

/// Absolute locations of the files and directories the launcher manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub package_file: PathBuf,
    pub deps_dir: PathBuf,
    pub venv_dir: PathBuf,
}
