//! Output artifact naming and creation.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use taifex_aggregate::Bar;
use taifex_types::InstrumentKey;

use crate::{FormatError, KlineFormatter};

/// Suffix marking one-minute granularity.
pub const FILE_SUFFIX: &str = "_1min.txt";

/// Result of [`write_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact was created.
    Written,
    /// An artifact already existed and was left untouched.
    Skipped,
}

/// Derives the date token from a report file name.
///
/// `Daily_2024_01_15.csv` becomes `20240115`: the `Daily` prefix, the `.csv`
/// extension and every underscore are removed.
#[must_use]
pub fn date_token(report_file_name: &str) -> String {
    report_file_name
        .replace("Daily", "")
        .replace(".csv", "")
        .replace('_', "")
}

/// Returns the artifact file name for an instrument and date token.
#[must_use]
pub fn artifact_name(key: &InstrumentKey, date_token: &str) -> String {
    format!("{key}_{date_token}{FILE_SUFFIX}")
}

/// Writes `bars` to `path` unless a file already exists there.
///
/// Creation is exclusive, so an existing artifact is never modified. A
/// partially written file is removed again on failure.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_if_absent(
    path: &Path,
    bars: &[Bar],
    formatter: &KlineFormatter,
) -> Result<WriteOutcome, FormatError> {
    let artifact_err = |e| FormatError::Artifact {
        path: path.to_path_buf(),
        source: e,
    };

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(WriteOutcome::Skipped),
        Err(e) => return Err(artifact_err(e)),
    };

    let mut writer = BufWriter::new(file);
    let written = formatter
        .write_bars(bars, &mut writer)
        .and_then(|()| writer.flush().map_err(FormatError::Io));

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(path);
        return Err(match e {
            FormatError::Io(source) => artifact_err(source),
            other => other,
        });
    }

    Ok(WriteOutcome::Written)
}
