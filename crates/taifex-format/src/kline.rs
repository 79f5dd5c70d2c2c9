//! K-line text format.

use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use taifex_aggregate::Bar;
use thiserror::Error;

/// Layout of the bar label timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error while writing to a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error while creating or writing an artifact.
    #[error("Failed to write '{path}': {source}")]
    Artifact {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Writes bars as `end,open,high,low,close,volume` lines.
///
/// Bars are labelled by their exclusive `end`, not their start. Numbers are
/// plain decimal text with trailing fractional zeros removed.
#[derive(Debug, Clone)]
pub struct KlineFormatter {
    delimiter: char,
}

impl Default for KlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl KlineFormatter {
    /// Creates a comma-delimited formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Writes one line per bar, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_bars<W: Write>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.end.format(TIMESTAMP_FORMAT),
                plain(bar.open),
                plain(bar.high),
                plain(bar.low),
                plain(bar.close),
                plain(bar.volume)
            )?;
        }

        Ok(())
    }
}

fn plain(value: Decimal) -> Decimal {
    value.normalize()
}
