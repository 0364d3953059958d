//! Launch orchestration.
//!
//! - [`request`] turns command-line flags into a [`LaunchRequest`]
//! - [`workflow`] runs the request through the launch states

pub mod request;
pub mod workflow;

pub use request::{BuildPlatform, LaunchAction, LaunchRequest, RunMode};
pub use workflow::{LaunchOutcome, LaunchState, Launcher, ENV_DEBUG, ENV_DEV_MODE};
