//! GYP document validation and target extraction
//!
//! Turns the raw file content into an [`ExtractReport`]: the accepted
//! targets, the global include directories, and every entry that was
//! skipped along the way.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::normalize::normalize;
use super::target::{SkipReason, Skipped, Target, TargetFilter, LOCAL_CONFIG_NAME};

/// Placeholder GYP uses for the checkout root in `include_dirs`
pub const DEPTH_PLACEHOLDER: &str = "<(DEPTH)";

#[derive(Debug, Error)]
pub enum GypError {
    #[error("input is empty")]
    EmptyInput,

    #[error("doesn't contain any valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("doesn't contain any valid JSON: empty document")]
    EmptyDocument,

    #[error("invalid gyp: {0}")]
    Schema(String),
}

/// Result of extracting targets from a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Accepted targets, in input order
    pub targets: Vec<Target>,

    /// `target_defaults.include_dirs`, placeholders and empties removed
    pub include_dirs: Vec<String>,

    /// Entries left out, in input order
    pub skipped: Vec<Skipped>,
}

impl ExtractReport {
    /// Number of `targets` entries that were dropped entirely
    pub fn skipped_targets(&self) -> usize {
        self.skipped.iter().filter(|s| s.reason.drops_target()).count()
    }
}

/// Normalizes, parses, validates and extracts in one go
pub fn extract(raw: &str, filter: &dyn TargetFilter) -> Result<ExtractReport, GypError> {
    let root = parse(raw)?;
    extract_from(&root, filter)
}

/// Parses relaxed GYP text into a JSON tree
pub fn parse(raw: &str) -> Result<Value, GypError> {
    if raw.is_empty() {
        return Err(GypError::EmptyInput);
    }

    let json = normalize(raw);
    if json.trim().is_empty() {
        return Err(GypError::EmptyDocument);
    }

    Ok(serde_json::from_str(&json)?)
}

/// Validates the document shape and extracts targets from a parsed tree
pub fn extract_from(root: &Value, filter: &dyn TargetFilter) -> Result<ExtractReport, GypError> {
    let root = root
        .as_object()
        .ok_or_else(|| GypError::Schema("top level is not an object".to_string()))?;

    let targets = root
        .get("targets")
        .and_then(Value::as_array)
        .ok_or_else(|| GypError::Schema("invalid or missing 'targets'".to_string()))?;

    let mut report = ExtractReport {
        include_dirs: include_dirs(root),
        ..Default::default()
    };

    for (index, value) in targets.iter().enumerate() {
        match extract_target(value, filter) {
            Ok((target, bad_sources)) => {
                report
                    .skipped
                    .extend(bad_sources.into_iter().map(|reason| Skipped { index, reason }));
                report.targets.push(target);
            }
            Err(reason) => report.skipped.push(Skipped { index, reason }),
        }
    }

    Ok(report)
}

/// Extracts one target, returning any skipped source entries alongside it
fn extract_target(
    value: &Value,
    filter: &dyn TargetFilter,
) -> Result<(Target, Vec<SkipReason>), SkipReason> {
    let object = value.as_object().ok_or(SkipReason::NotAnObject)?;

    let name = object
        .get("target_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(SkipReason::MissingName)?;

    if name.contains('/') {
        return Err(SkipReason::InvalidName {
            name: name.to_string(),
        });
    }

    if name == LOCAL_CONFIG_NAME {
        return Err(SkipReason::ReservedName {
            name: name.to_string(),
        });
    }

    if filter.excludes(name) {
        return Err(SkipReason::Excluded {
            name: name.to_string(),
        });
    }

    let entries = object
        .get("sources")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| SkipReason::NoSources {
            name: name.to_string(),
        })?;

    let mut files = Vec::with_capacity(entries.len());
    let mut bad_sources = Vec::new();
    for (position, entry) in entries.iter().enumerate() {
        match entry.as_str().filter(|s| !s.is_empty()) {
            Some(file) => files.push(file),
            None => bad_sources.push(SkipReason::InvalidSource {
                name: name.to_string(),
                position,
            }),
        }
    }

    Ok((Target::new(name, files), bad_sources))
}

fn include_dirs(root: &Map<String, Value>) -> Vec<String> {
    root.get("target_defaults")
        .and_then(|defaults| defaults.get("include_dirs"))
        .and_then(Value::as_array)
        .map(|dirs| {
            dirs.iter()
                .filter_map(Value::as_str)
                .filter(|dir| !dir.is_empty() && *dir != DEPTH_PLACEHOLDER)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExcludePatterns;

    fn run(raw: &str) -> ExtractReport {
        extract(raw, &ExcludePatterns::default()).unwrap()
    }

    #[test]
    fn extracts_single_target() {
        let report = run("{'targets': [{'target_name': 'foo', 'sources': ['a.cpp', 'b.h']}]}");

        assert_eq!(report.targets, vec![Target::new("foo", ["a.cpp", "b.h"])]);
        assert_eq!(report.targets[0].headers, vec!["b.h"]);
        assert_eq!(report.targets[0].sources, vec!["a.cpp"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = extract("", &ExcludePatterns::default()).unwrap_err();
        assert!(matches!(err, GypError::EmptyInput));
    }

    #[test]
    fn comment_only_input_is_an_empty_document() {
        let err = extract("# nothing here\n# at all\n", &ExcludePatterns::default()).unwrap_err();
        assert!(matches!(err, GypError::EmptyDocument));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = extract("{'targets': [", &ExcludePatterns::default()).unwrap_err();
        assert!(matches!(err, GypError::Parse(_)));
    }

    #[test]
    fn non_object_root_is_a_schema_error() {
        let err = extract("['a', 'b']", &ExcludePatterns::default()).unwrap_err();
        assert!(matches!(err, GypError::Schema(_)));
    }

    #[test]
    fn missing_or_non_array_targets_is_a_schema_error() {
        for raw in ["{'variables': {}}", "{'targets': {'target_name': 'x'}}"] {
            let err = extract(raw, &ExcludePatterns::default()).unwrap_err();
            assert!(matches!(err, GypError::Schema(_)), "{raw}");
        }
    }

    #[test]
    fn skip_reasons_are_reported_in_order() {
        let report = run(r#"{
            'targets': [
                'not an object',
                {'sources': ['a.cc']},
                {'target_name': 'bad/name', 'sources': ['a.cc']},
                {'target_name': 'base_unittests', 'sources': ['a.cc']},
                {'target_name': 'nosrc'},
                {'target_name': 'emptysrc', 'sources': []},
                {'target_name': 'good', 'sources': ['a.cc']},
            ],
        }"#);

        let reasons: Vec<_> = report.skipped.iter().map(|s| (s.index, &s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (0, &SkipReason::NotAnObject),
                (1, &SkipReason::MissingName),
                (2, &SkipReason::InvalidName { name: "bad/name".into() }),
                (3, &SkipReason::Excluded { name: "base_unittests".into() }),
                (4, &SkipReason::NoSources { name: "nosrc".into() }),
                (5, &SkipReason::NoSources { name: "emptysrc".into() }),
            ]
        );
        assert_eq!(report.skipped_targets(), 6);
        assert_eq!(report.targets.len(), 1);
        assert_eq!(report.targets[0].name, "good");
    }

    #[test]
    fn config_target_would_clobber_local_config() {
        let report = run(r#"{
            'targets': [
                {'target_name': 'config', 'sources': ['a.cc']},
                {'target_name': 'config_parser', 'sources': ['b.cc']},
            ],
        }"#);

        assert_eq!(
            report.skipped,
            vec![Skipped {
                index: 0,
                reason: SkipReason::ReservedName { name: "config".into() },
            }]
        );
        assert_eq!(report.targets.len(), 1);
        assert_eq!(report.targets[0].name, "config_parser");
    }

    #[test]
    fn non_string_name_counts_as_missing() {
        let report = run("{'targets': [{'target_name': 7, 'sources': ['a.cc']}]}");
        assert_eq!(report.skipped[0].reason, SkipReason::MissingName);
    }

    #[test]
    fn test_check_runs_before_sources_check() {
        let report = run("{'targets': [{'target_name': 'footest'}]}");
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Excluded { name: "footest".into() }
        );
    }

    #[test]
    fn invalid_sources_are_dropped_individually() {
        let report = run("{'targets': [{'target_name': 'foo', 'sources': ['a.cc', '', 3, 'b.h']}]}");

        assert_eq!(report.targets[0], Target::new("foo", ["a.cc", "b.h"]));
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::InvalidSource { name: "foo".into(), position: 2 }
        );
        assert_eq!(report.skipped_targets(), 0);
    }

    #[test]
    fn target_with_only_invalid_sources_is_kept() {
        let report = run("{'targets': [{'target_name': 'foo', 'sources': ['']}]}");

        assert_eq!(report.targets.len(), 1);
        assert!(report.targets[0].headers.is_empty());
        assert!(report.targets[0].sources.is_empty());
    }

    #[test]
    fn custom_filter_replaces_test_heuristic() {
        let keep_all = |_: &str| false;
        let report = extract(
            "{'targets': [{'target_name': 'latest_feature', 'sources': ['a.cc']}]}",
            &keep_all,
        )
        .unwrap();

        assert_eq!(report.targets[0].name, "latest_feature");
    }

    #[test]
    fn include_dirs_drop_placeholders_and_empties() {
        let report = run(r#"{
            'target_defaults': {
                'include_dirs': ['<(DEPTH)', '', 'include', 5, 'third_party/x'],
            },
            'targets': [],
        }"#);

        assert_eq!(report.include_dirs, vec!["include", "third_party/x"]);
    }

    #[test]
    fn malformed_target_defaults_mean_no_include_dirs() {
        for raw in [
            "{'targets': []}",
            "{'target_defaults': 'x', 'targets': []}",
            "{'target_defaults': {'include_dirs': 'include'}, 'targets': []}",
        ] {
            assert!(run(raw).include_dirs.is_empty(), "{raw}");
        }
    }
}
