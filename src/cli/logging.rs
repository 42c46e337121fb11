//! Diagnostic output setup
//!
//! Warnings about skipped entries and progress messages go to stderr
//! through `tracing`; stdout is reserved for the run summary.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// How much diagnostic output to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Installs the stderr subscriber
///
/// Only the level chosen on the command line is honoured; the environment
/// is not consulted.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::default().add_directive(LevelFilter::from_level(verbosity.level()).into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
