//! # Storage Layer
//!
//! Everything that touches the filesystem.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Input | GYP (relaxed JSON) | path given on the command line |
//! | Target includes | qmake `.pri` | `./<target>.pri` |
//! | Project | qmake `.pro` | `./<input base name>.pro` |
//! | Local config | qmake `.pri` | `./config.pri`, never overwritten |
//! | Tool config | TOML | `--config` or the user config dir |
//!
//! ## Key Types
//!
//! - [`GypFile`] - The input file and the names derived from its path
//! - [`PriWriter`] - Renders and writes the generated files
//! - [`Config`] - Tool configuration

mod gyp_file;
mod pri;
mod config;

pub use gyp_file::GypFile;
pub use pri::{
    render_local_config, render_project, render_target, EmitError, LocalConfig, PriWriter,
    ProjectFile, LOCAL_CONFIG_FILE,
};
pub use config::{Config, ConfigError, ExcludeConfig, LocalConfigDefaults};
