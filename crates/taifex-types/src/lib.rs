//! Core types for the taifex-kline tick-to-bar converter.
//!
//! This crate provides the data structures shared by every stage:
//!
//! - [`TickRecord`] - A single outright trade parsed from a daily report
//! - [`InstrumentKey`] - Symbol plus settlement period identifying one contract series
//! - [`SymbolSet`] - Allow-list of symbols that participate in aggregation

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/taifex-kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod instrument;
mod tick;

pub use instrument::{DEFAULT_SYMBOLS, InstrumentKey, SymbolSet};
pub use tick::TickRecord;

/// Re-exported so downstream crates agree on one decimal type.
pub use rust_decimal::Decimal;
