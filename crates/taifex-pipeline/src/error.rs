//! Error types for the pipeline.

use std::path::PathBuf;
use taifex_aggregate::AggregateError;
use taifex_format::FormatError;
use taifex_ingest::{ArchiveError, ReportError};
use taifex_types::InstrumentKey;
use thiserror::Error;

use crate::ConfigError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Archive staging or extraction failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A report could not be read or violated the report layout.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// An instrument's ticks could not be bucketed.
    #[error("{key}: {source}")]
    Aggregate {
        /// The instrument whose ticks failed.
        key: InstrumentKey,
        /// The bucketing failure.
        source: AggregateError,
    },

    /// An artifact could not be written.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The path has no usable file name.
    #[error("Not a report file: '{0}'")]
    InvalidReportPath(PathBuf),
}
