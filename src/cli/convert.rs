//! The conversion pipeline: read, extract, emit, report

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::output::Output;
use crate::domain::{extract, Skipped, TargetFilter};
use crate::storage::{GypFile, LocalConfig, PriWriter, ProjectFile, LOCAL_CONFIG_FILE};

/// Knobs for a single conversion
pub struct ConvertOptions<'a> {
    /// Decides which well-formed targets to leave out
    pub filter: &'a dyn TargetFilter,

    /// Contents of `config.pri` if it has to be created
    pub local_config: LocalConfig,

    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

/// A target whose `.pri` file couldn't be written
#[derive(Debug, Clone, Serialize)]
pub struct FailedTarget {
    pub name: String,
    pub error: String,
}

/// What a conversion produced
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    /// The `.pro` file
    pub project: String,

    /// `.pri` files referenced from the project, in order
    pub targets: Vec<String>,

    /// Targets that were accepted but couldn't be written
    pub failed: Vec<FailedTarget>,

    /// Entries left out of the output
    pub skipped: Vec<Skipped>,

    /// Whether `config.pri` was (or would be) created
    pub config_created: bool,

    pub dry_run: bool,
}

/// Converts one GYP file, writing the results through `writer`
pub fn convert(
    input: &Path,
    options: &ConvertOptions<'_>,
    writer: &PriWriter,
) -> Result<ConvertSummary> {
    let gyp = GypFile::read(input)?;
    info!("Parsing {}", gyp.path().display());

    let report = extract(gyp.contents(), options.filter)
        .with_context(|| gyp.path().display().to_string())?;

    for skipped in &report.skipped {
        if skipped.reason.is_expected() {
            info!("{}", skipped.reason);
        } else {
            warn!("targets[{}]: {}", skipped.index, skipped.reason);
        }
    }
    debug!(
        accepted = report.targets.len(),
        skipped = report.skipped_targets(),
        include_dirs = report.include_dirs.len(),
        "extracted targets"
    );

    let mut written = Vec::with_capacity(report.targets.len());
    let mut failed = Vec::new();
    for target in &report.targets {
        if options.dry_run {
            written.push(target.pri_file_name());
            continue;
        }

        match writer.write_target(target) {
            Ok(file_name) => {
                debug!(
                    headers = target.headers.len(),
                    sources = target.sources.len(),
                    "wrote {}",
                    file_name
                );
                written.push(file_name);
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                error!("{:#}", e);
                failed.push(FailedTarget {
                    name: target.name.clone(),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    let project = ProjectFile {
        name: gyp.base_name(),
        source_dir: gyp.source_dir_var(),
        include_dirs: report.include_dirs,
        includes: written.clone(),
    };

    let (project_name, config_created) = if options.dry_run {
        let exists = writer.dir().join(LOCAL_CONFIG_FILE).exists();
        (project.file_name(), !exists)
    } else {
        let project_name = writer.write_project(&project)?;
        let config_created = match writer.ensure_local_config(&options.local_config) {
            Ok(created) => created,
            Err(e) => {
                warn!("{:#}", anyhow::Error::new(e));
                false
            }
        };
        (project_name, config_created)
    };

    Ok(ConvertSummary {
        project: project_name,
        targets: written,
        failed,
        skipped: report.skipped,
        config_created,
        dry_run: options.dry_run,
    })
}

/// Prints the summary of a finished conversion
pub fn report(summary: &ConvertSummary, output: &Output) {
    if output.is_json() {
        output.data(summary);
        return;
    }

    let verb = if summary.dry_run { "Would create" } else { "Created" };

    output.success(&format!(
        "{} {} with {} target(s)",
        verb,
        summary.project,
        summary.targets.len()
    ));
    for target in &summary.targets {
        output.item(target);
    }

    if !summary.failed.is_empty() {
        let names: Vec<_> = summary.failed.iter().map(|f| f.name.as_str()).collect();
        output.error(&format!(
            "failed to write {} target(s): {}",
            names.len(),
            names.join(", ")
        ));
    }

    if summary.config_created {
        output.success(&format!("{} {}", verb, LOCAL_CONFIG_FILE));
        output.success(&format!(
            "Remember to edit {} to adjust the build to your satisfaction.",
            LOCAL_CONFIG_FILE
        ));
    }
}
