//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! selected by [`CommandDispatcher`] from the parsed flags.

pub mod completions;
pub mod dispatcher;
pub mod launch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
