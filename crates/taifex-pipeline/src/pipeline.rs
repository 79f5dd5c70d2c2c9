//! Stage orchestration.
//!
//! Each stage isolates failures per file: a failing archive or report is
//! logged, counted in the [`RunSummary`] and skipped, and the run goes on.

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use taifex_aggregate::aggregate;
use taifex_format::{WriteOutcome, artifact_name, date_token, write_if_absent};
use taifex_ingest::{archive, group_by_instrument, read_report};

use crate::{PipelineContext, PipelineError, ReportSummary, Result, RunSummary};

/// Copies archives from the download directory into the archive store.
///
/// Returns the names of every archive found in the download directory that
/// is now present in the store, whether copied by this call or earlier.
///
/// # Errors
///
/// Returns an error only if the download directory cannot be listed.
pub fn stage_archives(context: &PipelineContext, summary: &mut RunSummary) -> Result<Vec<String>> {
    let config = context.config();
    let names = archive::list_archives(&config.download_dir, &config.archive_prefix)?;

    let mut staged = Vec::with_capacity(names.len());
    for name in names {
        match archive::stage_archive(&name, &config.download_dir, &config.zip_dir) {
            Ok(true) => {
                info!("Staged {name}");
                summary.archives_staged += 1;
                staged.push(name);
            }
            Ok(false) => {
                debug!("{name} already staged");
                staged.push(name);
            }
            Err(e) => {
                error!("{e}");
                summary.archives_failed += 1;
            }
        }
    }

    Ok(staged)
}

/// Extracts staged archives into the report store.
///
/// Returns the paths of the `.csv` reports the archives contain.
pub fn extract_archives(
    context: &PipelineContext,
    archives: &[String],
    summary: &mut RunSummary,
) -> Vec<PathBuf> {
    let config = context.config();
    let mut reports = Vec::new();

    for name in archives {
        match archive::extract_archive(&config.zip_dir.join(name), &config.csv_dir) {
            Ok(entries) => reports.extend(
                entries
                    .into_iter()
                    .filter(|entry| is_report(entry))
                    .map(|entry| config.csv_dir.join(entry)),
            ),
            Err(e) => {
                error!("{e}");
                summary.archives_failed += 1;
            }
        }
    }

    reports
}

fn is_report(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".csv")
}

/// Converts one report into per-instrument K-line artifacts.
///
/// All instruments are bucketed before anything is written, so a report
/// that fails bucketing produces no output at all. Instruments whose
/// artifact already exists are skipped without being bucketed.
///
/// # Errors
///
/// Returns an error if the report cannot be read or violates the report
/// layout, if an instrument cannot be bucketed, or if an artifact cannot be
/// written.
pub fn convert_report(context: &PipelineContext, path: &Path) -> Result<ReportSummary> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PipelineError::InvalidReportPath(path.to_path_buf()))?;

    let parsed = read_report(context.parser(), path)?;
    let token = date_token(file_name);
    let groups = group_by_instrument(parsed.ticks);

    let mut summary = ReportSummary {
        report: file_name.to_string(),
        instruments: groups.len(),
        lines_skipped: parsed.skipped_lines,
        ..ReportSummary::default()
    };

    let mut pending = Vec::with_capacity(groups.len());
    for (key, ticks) in &groups {
        let artifact = context.config().kline_dir.join(artifact_name(key, &token));
        if artifact.exists() {
            debug!("{} exists, skipping {key}", artifact.display());
            summary.artifacts_skipped += 1;
            continue;
        }

        let bars = aggregate(ticks).map_err(|source| PipelineError::Aggregate {
            key: key.clone(),
            source,
        })?;
        debug!("{key}: {} ticks -> {} bars", ticks.len(), bars.len());
        pending.push((artifact, bars));
    }

    for (artifact, bars) in pending {
        match write_if_absent(&artifact, &bars, context.formatter())? {
            WriteOutcome::Written => {
                debug!("Wrote {} ({} bars)", artifact.display(), bars.len());
                summary.artifacts_written += 1;
                summary.bars_written += bars.len();
            }
            WriteOutcome::Skipped => summary.artifacts_skipped += 1,
        }
    }

    Ok(summary)
}

/// Converts reports one after another, skipping those that fail.
///
/// `on_report` is called after each report, successful or not.
pub fn convert_reports<F>(
    context: &PipelineContext,
    reports: &[PathBuf],
    summary: &mut RunSummary,
    mut on_report: F,
) where
    F: FnMut(&Path),
{
    for path in reports {
        match convert_report(context, path) {
            Ok(report) => {
                debug!(
                    "{}: {} instruments, {} files written, {} already present",
                    report.report,
                    report.instruments,
                    report.artifacts_written,
                    report.artifacts_skipped
                );
                summary.record(&report);
            }
            Err(e) => {
                error!("Skipping {}: {e}", path.display());
                summary.reports_failed += 1;
            }
        }
        on_report(path);
    }
}

/// Runs every stage: stage archives, extract reports, convert reports.
///
/// # Errors
///
/// Returns an error only if the download directory cannot be listed;
/// per-file failures are counted in the returned summary.
pub fn run(context: &PipelineContext) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let archives = stage_archives(context, &mut summary)?;
    let reports = extract_archives(context, &archives, &mut summary);
    convert_reports(context, &reports, &mut summary, |_| {});
    Ok(summary)
}
