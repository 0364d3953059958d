//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::error::Result;
use crate::runner::LaunchRequest;

/// Internet Server Browser launcher.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "isb-launcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Start in development mode with DevTools
    #[arg(long)]
    pub dev: bool,

    /// Build packages for the given platform (win, linux)
    #[arg(long, value_name = "PLATFORM")]
    pub build: Option<String>,

    /// Verify all components without starting the browser
    #[arg(long)]
    pub verify: bool,

    /// Reset virtual environment and dependencies before launching
    #[arg(long)]
    pub reset: bool,

    /// Keep the browser attached to this terminal and wait for it to exit
    #[arg(long)]
    pub foreground: bool,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Path to launcher settings (overrides default .isb-launcher.yml)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// The launch request these flags describe.
    pub fn launch_request(&self) -> Result<LaunchRequest> {
        LaunchRequest::from_flags(
            self.dev,
            self.build.as_deref(),
            self.verify,
            self.reset,
            self.foreground,
        )
    }
}
