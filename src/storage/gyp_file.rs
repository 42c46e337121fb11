//! The GYP input file
//!
//! Reads the file and derives the names the generated `.pro` file needs.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::GypError;

/// A GYP file read from disk
#[derive(Debug, Clone)]
pub struct GypFile {
    path: PathBuf,
    contents: String,
}

impl GypFile {
    /// Reads the whole file, failing if it can't be opened or is empty
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Unable to open file {}", path.display()))?;

        if contents.is_empty() {
            return Err(GypError::EmptyInput)
                .with_context(|| format!("{} is empty", path.display()));
        }

        Ok(Self { path, contents })
    }

    #[cfg(test)]
    fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// File name up to the first `.`, used as the `.pro` name and `TARGET`
    ///
    /// `dir/net.gyp` and `net.shared.gyp` both give `net`.
    pub fn base_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match file_name.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => file_name,
        }
    }

    /// Directory the file lives in, as given on the command line
    ///
    /// Returns `.` for a bare file name.
    pub fn source_dir(&self) -> String {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_string_lossy().into_owned()
            }
            _ => ".".to_string(),
        }
    }

    /// Value of `SOURCE_DIR` in the `.pro` file
    ///
    /// Relative directories are anchored at `$$PWD`, absolute ones are
    /// used verbatim.
    pub fn source_dir_var(&self) -> String {
        let dir = self.source_dir();
        let absolute = matches!(
            Path::new(&dir).components().next(),
            Some(Component::RootDir | Component::Prefix(_))
        );

        if absolute {
            dir
        } else {
            format!("$$PWD/{}", dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn base_name_stops_at_first_dot() {
        assert_eq!(GypFile::from_contents("net.gyp", "{}").base_name(), "net");
        assert_eq!(GypFile::from_contents("a/b/net.shared.gyp", "{}").base_name(), "net");
        assert_eq!(GypFile::from_contents("Makefile", "{}").base_name(), "Makefile");
    }

    #[test]
    fn source_dir_defaults_to_dot() {
        let file = GypFile::from_contents("net.gyp", "{}");

        assert_eq!(file.source_dir(), ".");
        assert_eq!(file.source_dir_var(), "$$PWD/.");
    }

    #[test]
    fn source_dir_keeps_relative_path() {
        let file = GypFile::from_contents("third_party/net/net.gyp", "{}");

        assert_eq!(file.source_dir(), "third_party/net");
        assert_eq!(file.source_dir_var(), "$$PWD/third_party/net");
    }

    #[cfg(unix)]
    #[test]
    fn absolute_source_dir_is_not_anchored() {
        let file = GypFile::from_contents("/src/net/net.gyp", "{}");
        assert_eq!(file.source_dir_var(), "/src/net");
    }

    #[test]
    fn read_rejects_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.gyp");
        fs::write(&path, "").unwrap();

        let err = GypFile::read(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<GypError>(), Some(GypError::EmptyInput)));
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = GypFile::read(dir.path().join("missing.gyp")).unwrap_err();

        assert!(err.to_string().contains("Unable to open file"));
    }

    #[test]
    fn read_loads_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.gyp");
        fs::write(&path, "{'targets': []}").unwrap();

        let file = GypFile::read(&path).unwrap();
        assert_eq!(file.contents(), "{'targets': []}");
        assert_eq!(file.base_name(), "net");
    }
}
