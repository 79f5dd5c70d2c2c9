//! Convert command implementation.
//!
//! Converts report files with a progress bar over files.

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use taifex_pipeline::{PipelineContext, RunSummary, convert_reports};

/// Convert the given reports and print the totals.
pub(crate) fn convert(
    context: &PipelineContext,
    reports: &[PathBuf],
    progress: &ProgressBar,
    quiet: bool,
) -> Result<()> {
    let mut summary = RunSummary::default();
    convert_with_progress(context, reports, &mut summary, progress, quiet)?;
    finish(&summary)
}

/// Convert reports into `summary`, drawing `progress` unless `quiet`.
pub(crate) fn convert_with_progress(
    context: &PipelineContext,
    reports: &[PathBuf],
    summary: &mut RunSummary,
    progress: &ProgressBar,
    quiet: bool,
) -> Result<()> {
    if !quiet {
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} reports {msg}")?
                .progress_chars("=>-"),
        );
        progress.set_length(reports.len() as u64);
        progress.set_draw_target(ProgressDrawTarget::stderr());
    }

    convert_reports(context, reports, summary, |path| {
        if let Some(name) = path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
        progress.inc(1);
    });

    progress.finish_with_message("done");
    Ok(())
}

/// Print the run totals, failing if any file failed.
pub(crate) fn finish(summary: &RunSummary) -> Result<()> {
    println!("{summary}");
    if summary.has_failures() {
        bail!(
            "{} archives and {} reports failed",
            summary.archives_failed,
            summary.reports_failed
        );
    }
    Ok(())
}
