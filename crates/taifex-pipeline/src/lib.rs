//! Report-to-K-line pipeline for TAIFEX daily tick reports.
//!
//! This crate wires the workspace crates into the staged run:
//!
//! 1. [`stage_archives`] copies downloaded `Daily_*.zip` archives into the archive store
//! 2. [`extract_archives`] unpacks them into the report store
//! 3. [`convert_reports`] turns each report into one K-line file per instrument
//!
//! [`run`] performs all three. Every stage is idempotent: existing archives,
//! reports and K-line files are left alone.
//!
//! # Example
//!
//! ```no_run
//! use taifex_pipeline::prelude::*;
//!
//! let context = PipelineContext::new(PipelineConfig::default())?;
//! let summary = taifex_pipeline::run(&context)?;
//! println!("{summary}");
//! # Ok::<(), taifex_pipeline::PipelineError>(())
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/taifex-kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod context;
mod error;
mod pipeline;
mod summary;

pub use config::{ConfigError, PipelineConfig};
pub use context::PipelineContext;
pub use error::{PipelineError, Result};
pub use pipeline::{convert_report, convert_reports, extract_archives, run, stage_archives};
pub use summary::{ReportSummary, RunSummary};

/// Prelude module for convenient imports.
///
/// ```
/// use taifex_pipeline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{PipelineConfig, PipelineContext, PipelineError, ReportSummary, RunSummary};

    pub use taifex_aggregate::{AggregateError, Bar, BarBucketer, aggregate};
    pub use taifex_format::{KlineFormatter, WriteOutcome};
    pub use taifex_ingest::{TickParser, group_by_instrument};
    pub use taifex_types::{Decimal, InstrumentKey, SymbolSet, TickRecord};
}
