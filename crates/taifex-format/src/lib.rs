//! K-line output for taifex-kline.
//!
//! This crate renders bars to the persisted text layout:
//!
//! - [`KlineFormatter`] - One `end,open,high,low,close,volume` line per bar
//! - [`artifact_name`] / [`date_token`] - Output file naming
//! - [`write_if_absent`] - Idempotent artifact creation

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/taifex-kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod artifact;
mod kline;

pub use artifact::{FILE_SUFFIX, WriteOutcome, artifact_name, date_token, write_if_absent};
pub use kline::{FormatError, KlineFormatter, TIMESTAMP_FORMAT};
