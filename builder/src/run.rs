//! One generation pass: snapshot in, dataset out.

use std::path::PathBuf;

use portal_data::{Aggregation, AggregationReport, BuildMode, PolicyError, build_dataset};
use tracing::{error, info, warn};

use crate::error::BuildError;
use crate::output::write_output;
use crate::settings::BuildSettings;
use crate::snapshot::load_snapshot;

/// Summary of a completed generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Mode the pass ran in.
    pub mode: BuildMode,
    /// Entities in the dataset.
    pub entities: usize,
    /// Records excluded from the dataset.
    pub excluded: usize,
    /// Warnings about kept records.
    pub warnings: usize,
    /// Where the dataset was written, if anywhere.
    pub output_path: Option<PathBuf>,
}

/// Runs a generation pass with `settings`.
///
/// # Errors
///
/// Returns [`BuildError`] when the snapshot cannot be loaded, the build
/// policy rejects the report, or the dataset cannot be written.
pub fn run(settings: &BuildSettings) -> Result<BuildOutcome, BuildError> {
    let mode = settings.mode()?;
    let snapshot_path = settings.snapshot_path();
    info!(path = %snapshot_path.display(), %mode, "loading content snapshot");
    let snapshot = load_snapshot(&snapshot_path)?;

    let Aggregation { dataset, report } = build_dataset(&snapshot);
    log_report(&report);
    apply_policy(&report, mode, settings.strict)?;

    if let Some(path) = &settings.output_path {
        write_output(path, &dataset.to_json_pretty()?)?;
        info!(path = %path.display(), entities = dataset.len(), "dataset written");
    }

    Ok(BuildOutcome {
        mode,
        entities: dataset.len(),
        excluded: report.errors().count(),
        warnings: report.warnings().count(),
        output_path: settings.output_path.clone(),
    })
}

fn log_report(report: &AggregationReport) {
    for entry in report.errors() {
        error!(
            kind = %entry.kind,
            record_id = entry.record_id.as_deref(),
            issue = %entry.issue,
            "record excluded"
        );
    }
    for entry in report.warnings() {
        warn!(
            kind = %entry.kind,
            record_id = entry.record_id.as_deref(),
            issue = %entry.issue,
            "record kept with warning"
        );
    }
}

/// Applies the mode policy, then the strict flag on top of it.
fn apply_policy(
    report: &AggregationReport,
    mode: BuildMode,
    strict: bool,
) -> Result<(), BuildError> {
    report.enforce(mode)?;
    if !strict {
        return Ok(());
    }
    let excluded = report.errors().count();
    if excluded > 0 {
        return Err(PolicyError::ExcludedRecords { count: excluded, mode }.into());
    }
    match report.warnings().count() {
        0 => Ok(()),
        count => Err(BuildError::StrictWarnings { count }),
    }
}
