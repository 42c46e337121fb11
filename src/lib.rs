//! gyp-to-pri - Converts GYP build files into qmake project files
//!
//! A GYP file is read, its relaxed syntax normalized to JSON, its targets
//! extracted, and one `.pri` include per target plus a `.pro` project file
//! written to the current directory.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{ExcludePatterns, ExtractReport, GypError, SkipReason, Target, TargetFilter};
