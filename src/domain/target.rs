//! Build targets extracted from a GYP document
//!
//! A [`Target`] is a named unit with its sources split into headers and
//! everything else. Entries that cannot become a target are reported as
//! [`Skipped`] with a [`SkipReason`] instead of failing the whole run.

use std::fmt;

use serde::Serialize;

/// A build target with its sources partitioned by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Target name, used as the `.pri` file stem
    pub name: String,

    /// Files ending in `.h`, in input order
    pub headers: Vec<String>,

    /// All other files, in input order
    pub sources: Vec<String>,
}

impl Target {
    /// Creates a target, partitioning `files` into headers and sources
    ///
    /// The partition is stable: relative order inside each group is kept.
    pub fn new<I, S>(name: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (headers, sources): (Vec<String>, Vec<String>) = files
            .into_iter()
            .map(Into::into)
            .partition(|file: &String| is_header(file));

        Self {
            name: name.into(),
            headers,
            sources,
        }
    }

    /// Name of the include file generated for this target
    pub fn pri_file_name(&self) -> String {
        format!("{}.pri", self.name)
    }
}

/// Target name whose `.pri` file would collide with the local config
pub const LOCAL_CONFIG_NAME: &str = "config";

/// Returns true if the path names a C/C++ header
pub fn is_header(path: &str) -> bool {
    path.ends_with(".h")
}

/// Why an entry of `targets` (or one of its sources) was left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The `targets` element is not an object
    NotAnObject,
    /// `target_name` is missing, empty or not a string
    MissingName,
    /// `target_name` contains a path separator
    InvalidName { name: String },
    /// `target_name` would generate the local config file
    ReservedName { name: String },
    /// The exclusion predicate matched (test targets by default)
    Excluded { name: String },
    /// `sources` is missing, empty or not an array
    NoSources { name: String },
    /// A single `sources` entry is empty or not a string
    InvalidSource { name: String, position: usize },
}

impl SkipReason {
    /// Returns true if the whole target was dropped, false if only one of
    /// its source entries was
    pub fn drops_target(&self) -> bool {
        !matches!(self, SkipReason::InvalidSource { .. })
    }

    /// Returns true for skips that are expected rather than malformed input
    pub fn is_expected(&self) -> bool {
        matches!(self, SkipReason::Excluded { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "invalid structure"),
            SkipReason::MissingName => write!(f, "target missing name"),
            SkipReason::InvalidName { name } => write!(f, "invalid target name: {}", name),
            SkipReason::ReservedName { name } => {
                write!(f, "target name is reserved for the local config: {}", name)
            }
            SkipReason::Excluded { name } => write!(f, "skipping potential test target: {}", name),
            SkipReason::NoSources { name } => {
                write!(f, "sources list missing or invalid in target {}", name)
            }
            SkipReason::InvalidSource { name, position } => write!(
                f,
                "empty or invalid source #{} in target {}",
                position, name
            ),
        }
    }
}

/// A skipped entry together with its index in `targets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub index: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Decides whether a well-formed target is left out of the output
pub trait TargetFilter {
    fn excludes(&self, name: &str) -> bool;
}

impl<F> TargetFilter for F
where
    F: Fn(&str) -> bool,
{
    fn excludes(&self, name: &str) -> bool {
        self(name)
    }
}

/// Excludes targets whose name contains any of the given substrings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludePatterns {
    patterns: Vec<String>,
}

impl ExcludePatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// A filter that keeps every target
    pub fn none() -> Self {
        Self { patterns: vec![] }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExcludePatterns {
    /// The coarse test-target heuristic: any name containing `test`
    fn default() -> Self {
        Self::new(["test"])
    }
}

impl TargetFilter for ExcludePatterns {
    fn excludes(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }
}
