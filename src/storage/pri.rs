//! qmake file emission
//!
//! Three kinds of files are written into the output directory:
//!
//! | File | Written |
//! |------|---------|
//! | `<target>.pri` | always, truncating any existing file |
//! | `<base>.pro` | always, after all `.pri` files |
//! | `config.pri` | only if it doesn't exist yet |

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Target;

/// Name of the user-editable local configuration
pub const LOCAL_CONFIG_FILE: &str = "config.pri";

/// qmake variable every generated path is relative to
const SOURCE_ROOT: &str = "$$SOURCE_DIR";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("error when opening {} for writing", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write target file {}", .path.display())]
    TargetWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Contents of the top-level `.pro` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Base name of the input file, used for `TARGET` and the file name
    pub name: String,

    /// Right-hand side of the `SOURCE_DIR` assignment
    pub source_dir: String,

    /// Entries of the `INCLUDEPATH` block
    pub include_dirs: Vec<String>,

    /// `.pri` files to include, in order
    pub includes: Vec<String>,
}

impl ProjectFile {
    pub fn file_name(&self) -> String {
        format!("{}.pro", self.name)
    }
}

/// Default lines of a freshly created `config.pri`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    pub template: String,
    pub config: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            template: "lib".to_string(),
            config: "c++11 static".to_string(),
        }
    }
}

/// Renders a `.pri` file for one target
pub fn render_target(target: &Target) -> String {
    let mut out = String::new();
    push_block(&mut out, "HEADERS", &target.headers);
    out.push('\n');
    push_block(&mut out, "SOURCES", &target.sources);
    out
}

/// Renders the top-level `.pro` file
pub fn render_project(project: &ProjectFile) -> String {
    let mut out = String::new();

    out.push_str("# Automatically generated by gyp-to-pri, do not edit.\n");
    out.push_str(&format!("# Put custom options in {}.\n\n", LOCAL_CONFIG_FILE));
    out.push_str(&format!("TARGET = {}\n\n", project.name));
    out.push_str(&format!("include({})\n\n", LOCAL_CONFIG_FILE));
    out.push_str(&format!("SOURCE_DIR = {}\n\n", project.source_dir));

    if !project.include_dirs.is_empty() {
        push_block(&mut out, "INCLUDEPATH", &project.include_dirs);
        out.push('\n');
    }

    for include in &project.includes {
        out.push_str(&format!("include({})\n", include));
    }

    out
}

/// Renders the default `config.pri`
pub fn render_local_config(config: &LocalConfig) -> String {
    format!(
        "TEMPLATE = {}\nCONFIG += {}\n",
        config.template, config.config
    )
}

fn push_block(out: &mut String, variable: &str, paths: &[String]) {
    out.push_str(&format!("{} += \\\n", variable));
    for path in paths {
        out.push_str(&format!("    {}/{} \\\n", SOURCE_ROOT, path));
    }
}

/// Writes generated files into one directory
pub struct PriWriter {
    dir: PathBuf,
}

impl PriWriter {
    /// Creates a writer for the given output directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `<target>.pri`, replacing any existing file
    ///
    /// Returns the file name relative to the output directory.
    pub fn write_target(&self, target: &Target) -> Result<String, EmitError> {
        let file_name = target.pri_file_name();
        let path = self.dir.join(&file_name);

        write_file(&path, &render_target(target))
            .map_err(|source| EmitError::TargetWrite { path, source })?;

        Ok(file_name)
    }

    /// Writes `<base>.pro`, replacing any existing file
    pub fn write_project(&self, project: &ProjectFile) -> Result<String, EmitError> {
        let file_name = project.file_name();
        let path = self.dir.join(&file_name);

        write_file(&path, &render_project(project))
            .map_err(|source| EmitError::OutputWrite { path, source })?;

        Ok(file_name)
    }

    /// Creates `config.pri` unless it already exists
    ///
    /// Returns true if the file was created. An existing file is never
    /// opened for writing.
    pub fn ensure_local_config(&self, config: &LocalConfig) -> Result<bool, EmitError> {
        let path = self.dir.join(LOCAL_CONFIG_FILE);

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(source) => return Err(EmitError::OutputWrite { path, source }),
        };

        write_to(file, &render_local_config(config))
            .map_err(|source| EmitError::OutputWrite { path, source })?;

        Ok(true)
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    write_to(file, contents)
}

fn write_to(file: File, contents: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}
