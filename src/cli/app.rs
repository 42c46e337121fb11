//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::debug;

use super::convert::{self, ConvertOptions};
use super::logging::{self, Verbosity};
use super::output::{Output, OutputFormat};
use crate::domain::ExcludePatterns;
use crate::storage::{Config, PriWriter};

const OVERWRITE_WARNING: &str = "WARNING: This will potentially OVERWRITE existing .pro/.pri files.";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing input file")]
    MissingInput,
}

#[derive(Parser)]
#[command(name = "gyp-to-pri")]
#[command(author, version, about = "Convert a GYP build file into qmake .pro/.pri files")]
#[command(after_help = OVERWRITE_WARNING)]
pub struct Cli {
    /// GYP file to convert; output goes to the current directory
    #[arg(value_name = "FOLDER/FILE.gyp")]
    pub input: Option<PathBuf>,

    /// Summary format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Show debug diagnostics
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip targets whose name contains PATTERN (repeatable, replaces the default "test")
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Keep targets that look like tests
    #[arg(long, conflicts_with = "exclude")]
    pub keep_tests: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Resolves the target filter from flags and configuration
    fn exclude_patterns(&self, config: &Config) -> ExcludePatterns {
        if self.keep_tests {
            ExcludePatterns::none()
        } else if !self.exclude.is_empty() {
            ExcludePatterns::new(self.exclude.iter().cloned())
        } else {
            config.exclude_patterns()
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));
    let output = Output::new(cli.format);

    let Some(input) = cli.input.as_deref() else {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("{}", OVERWRITE_WARNING);
        return Err(CliError::MissingInput.into());
    };

    let config = Config::load(cli.config.as_deref())?;
    let filter = cli.exclude_patterns(&config);
    debug!(patterns = ?filter.patterns(), "target exclusion");

    let options = ConvertOptions {
        filter: &filter,
        local_config: config.local_config(),
        dry_run: cli.dry_run,
    };

    let summary = convert::convert(input, &options, &PriWriter::new("."))?;
    convert::report(&summary, &output);

    Ok(())
}
