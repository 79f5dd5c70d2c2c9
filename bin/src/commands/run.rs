//! Run, stage and extract command implementations.

use anyhow::Result;
use indicatif::ProgressBar;
use taifex_pipeline::{PipelineContext, RunSummary, extract_archives, stage_archives};

use super::convert::{convert_with_progress, finish};

/// Stage archives only.
pub(crate) fn stage(context: &PipelineContext) -> Result<()> {
    let mut summary = RunSummary::default();
    let archives = stage_archives(context, &mut summary)?;
    println!(
        "{} archives staged ({} already present)",
        summary.archives_staged,
        archives.len() - summary.archives_staged
    );
    finish_staging(&summary)
}

/// Stage archives and extract their reports.
pub(crate) fn extract(context: &PipelineContext) -> Result<()> {
    let mut summary = RunSummary::default();
    let archives = stage_archives(context, &mut summary)?;
    let reports = extract_archives(context, &archives, &mut summary);
    println!(
        "{} reports available from {} archives",
        reports.len(),
        archives.len()
    );
    finish_staging(&summary)
}

/// Stage, extract and convert everything.
pub(crate) fn run(context: &PipelineContext, progress: &ProgressBar, quiet: bool) -> Result<()> {
    let mut summary = RunSummary::default();
    let archives = stage_archives(context, &mut summary)?;
    let reports = extract_archives(context, &archives, &mut summary);
    log::info!(
        "{} reports from {} archives in {}",
        reports.len(),
        archives.len(),
        context.config().download_dir.display()
    );

    convert_with_progress(context, &reports, &mut summary, progress, quiet)?;
    finish(&summary)
}

fn finish_staging(summary: &RunSummary) -> Result<()> {
    if summary.archives_failed > 0 {
        anyhow::bail!("{} archives failed", summary.archives_failed);
    }
    Ok(())
}
