//! # Command-Line Interface
//!
//! ```bash
//! gyp-to-pri [OPTIONS] <folder/file.gyp>
//! ```
//!
//! Writes one `<target>.pri` per target, `<file>.pro` referencing them all,
//! and `config.pri` if it doesn't exist yet, into the current directory.
//!
//! ## Output
//!
//! - Diagnostics (skipped targets, progress) go to stderr; `--verbose`
//!   and `--quiet` adjust how much.
//! - The summary goes to stdout, as `text` (default) or `json` via
//!   `--format`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and convert.

mod app;
mod convert;
mod logging;
mod output;

pub use app::{run, Cli, CliError};
pub use convert::{convert, report, ConvertOptions, ConvertSummary, FailedTarget};
pub use logging::Verbosity;
pub use output::{Output, OutputFormat};
