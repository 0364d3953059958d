//! Dependency installation.
//!
//! Every install is guarded by a marker directory: `node_modules` for the
//! Node dependencies, `.venv` for the Python environment. Component
//! verification and reset round this out.

pub mod components;
pub mod installer;
pub mod python;
pub mod reset;

pub use components::{aux_install_command, missing_components, verify_components};
pub use installer::{ensure_installed, run_install, DependencySet, InstallOutcome};
pub use python::{ensure_python_env, venv_pip};
pub use reset::reset_environment;
