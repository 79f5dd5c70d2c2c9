//! Whole-report reading.

use crate::{ParseError, TickParser};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use taifex_types::TickRecord;
use thiserror::Error;

/// Errors that abort processing of one report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("Failed to read report '{path}': {source}")]
    Read {
        /// The report path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line violated the fixed report layout.
    #[error("Line {line}: {source}")]
    Malformed {
        /// One-based line number within the report.
        line: usize,
        /// The parse failure.
        source: ParseError,
    },
}

/// Filtered ticks of one report plus bookkeeping about dropped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    /// Ticks in file order.
    pub ticks: Vec<TickRecord>,
    /// Lines dropped because a field failed to parse.
    pub skipped_lines: usize,
}

/// Parses report contents.
///
/// The first line is always a header and is discarded. Bytes that are not
/// valid UTF-8 (the header of exchange reports is Big5) are replaced rather
/// than rejected.
///
/// # Errors
///
/// Returns [`ReportError::Malformed`] on the first non-recoverable line.
pub fn parse_report(parser: &TickParser, contents: &[u8]) -> Result<ParsedReport, ReportError> {
    let text = String::from_utf8_lossy(contents);
    let mut report = ParsedReport::default();

    for (index, line) in text.lines().enumerate().skip(1) {
        match parser.parse_line(line) {
            Ok(Some(tick)) => report.ticks.push(tick),
            Ok(None) => {}
            Err(e) if e.is_recoverable() => {
                warn!("Skipping line {}: {e}", index + 1);
                report.skipped_lines += 1;
            }
            Err(e) => {
                return Err(ReportError::Malformed {
                    line: index + 1,
                    source: e,
                });
            }
        }
    }

    Ok(report)
}

/// Reads and parses a report file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains a malformed line.
pub fn read_report(parser: &TickParser, path: &Path) -> Result<ParsedReport, ReportError> {
    let contents = fs::read(path).map_err(|e| ReportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_report(parser, &contents)
}
