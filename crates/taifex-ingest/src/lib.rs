//! Daily report ingestion for taifex-kline.
//!
//! This crate turns downloaded exchange reports into grouped tick streams:
//!
//! - [`archive`] - Staging and extraction of `Daily_*.zip` archives
//! - [`TickParser`] - Line parsing with spread-trade and symbol filters
//! - [`parse_report`] / [`read_report`] - Whole-report parsing with header handling
//! - [`group_by_instrument`] - Per-instrument partitioning in deterministic order

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/taifex-kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod archive;
mod group;
mod parse;
mod report;

pub use archive::ArchiveError;
pub use group::{InstrumentGroups, group_by_instrument};
pub use parse::{FIELD_COUNT, Field, OUTRIGHT_MARKER, ParseError, TickParser};
pub use report::{ParsedReport, ReportError, parse_report, read_report};
