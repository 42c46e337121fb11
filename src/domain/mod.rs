//! Domain models for gyp-to-pri
//!
//! Contains the conversion logic without any I/O concerns.

mod normalize;
mod target;
mod gyp;

pub use normalize::{escape_quotes, normalize, requote, strip_comments, strip_trailing_commas};
pub use target::{
    is_header, ExcludePatterns, SkipReason, Skipped, Target, TargetFilter, LOCAL_CONFIG_NAME,
};
pub use gyp::{extract, extract_from, parse, ExtractReport, GypError, DEPTH_PLACEHOLDER};
