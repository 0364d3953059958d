//! isb-launcher - launcher for the Internet Server Browser desktop app.
//!
//! The launcher prepares a project checkout and then starts, builds or just
//! verifies the application:
//!
//! 1. optional reset of the Python virtual environment and `node_modules`
//! 2. Python virtual environment and Node dependency installs
//! 3. `config.ollama` defaults in `package.json`
//! 4. resource limiter component verification
//! 5. `npm run start|dev` with a startup liveness check, or
//!    `npm run build:<platform>`
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - The `package.json` record and launcher settings
//! - [`deps`] - Marker-directory installs, venv creation, reset
//! - [`error`] - Error types and result aliases
//! - [`process`] - Command execution and application spawning
//! - [`runner`] - Launch requests and the launch state machine
//! - [`ui`] - Terminal output, spinners and the mock UI
//!
//! # Example
//!
//! ```
//! use isb_launcher::runner::{LaunchAction, LaunchRequest, RunMode};
//!
//! let request = LaunchRequest::from_flags(true, None, false, false, false).unwrap();
//! assert_eq!(request.mode, RunMode::Dev);
//! assert_eq!(request.action, LaunchAction::Start);
//! assert_eq!(request.mode.run_target(), "dev");
//! ```

pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod process;
pub mod runner;
pub mod ui;

pub use error::{LauncherError, Result};
