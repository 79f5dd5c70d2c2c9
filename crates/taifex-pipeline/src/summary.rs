//! Run bookkeeping.

/// Outcome of converting one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Report file name.
    pub report: String,
    /// Instruments found in the report.
    pub instruments: usize,
    /// Artifacts created.
    pub artifacts_written: usize,
    /// Artifacts that already existed.
    pub artifacts_skipped: usize,
    /// Bars written across all created artifacts.
    pub bars_written: usize,
    /// Lines dropped because a field failed to parse.
    pub lines_skipped: usize,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Archives copied into the archive store.
    pub archives_staged: usize,
    /// Archives that could not be staged or extracted.
    pub archives_failed: usize,
    /// Reports converted successfully.
    pub reports_processed: usize,
    /// Reports that failed and were skipped.
    pub reports_failed: usize,
    /// Instruments found across converted reports.
    pub instruments: usize,
    /// Artifacts created.
    pub artifacts_written: usize,
    /// Bars written across all created artifacts.
    pub bars_written: usize,
    /// Artifacts that already existed.
    pub artifacts_skipped: usize,
    /// Lines dropped because a field failed to parse.
    pub lines_skipped: usize,
}

impl RunSummary {
    /// Adds one converted report to the totals.
    pub fn record(&mut self, report: &ReportSummary) {
        self.reports_processed += 1;
        self.instruments += report.instruments;
        self.artifacts_written += report.artifacts_written;
        self.bars_written += report.bars_written;
        self.artifacts_skipped += report.artifacts_skipped;
        self.lines_skipped += report.lines_skipped;
    }

    /// Returns true if any archive or report failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.archives_failed > 0 || self.reports_failed > 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} reports converted ({} failed), {} instruments, {} K-line files written ({} bars), {} already present",
            self.reports_processed,
            self.reports_failed,
            self.instruments,
            self.artifacts_written,
            self.bars_written,
            self.artifacts_skipped
        )?;
        if self.lines_skipped > 0 {
            write!(f, ", {} lines skipped", self.lines_skipped)?;
        }
        if self.archives_failed > 0 {
            write!(f, ", {} archives failed", self.archives_failed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut summary = RunSummary::default();
        let report = ReportSummary {
            report: "Daily_2024_01_15.csv".to_string(),
            instruments: 3,
            artifacts_written: 2,
            artifacts_skipped: 1,
            bars_written: 600,
            lines_skipped: 4,
        };

        summary.record(&report);
        summary.record(&report);

        assert_eq!(summary.reports_processed, 2);
        assert_eq!(summary.instruments, 6);
        assert_eq!(summary.artifacts_written, 4);
        assert_eq!(summary.bars_written, 1200);
        assert_eq!(summary.artifacts_skipped, 2);
        assert_eq!(summary.lines_skipped, 8);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_display() {
        let summary = RunSummary {
            reports_processed: 2,
            reports_failed: 1,
            instruments: 5,
            artifacts_written: 4,
            bars_written: 1200,
            lines_skipped: 3,
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "2 reports converted (1 failed), 5 instruments, 4 K-line files written (1200 bars), 0 already present, 3 lines skipped"
        );
        assert!(summary.has_failures());
    }
}
