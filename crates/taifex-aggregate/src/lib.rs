//! One-minute K-line aggregation for taifex-kline.
//!
//! This crate provides the tick-to-bar engine:
//!
//! - [`Bar`] - One-minute OHLCV bar over a half-open interval
//! - [`BarBucketer`] - Streaming state machine that closes bars as ticks arrive
//! - [`aggregate`] - Convenience driver over a whole tick sequence

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/taifex-kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod bucketer;

pub use bar::{BAR_DURATION_SECS, Bar, bar_duration};
pub use bucketer::{AggregateError, BarBucketer, aggregate, floor_to_minute};
