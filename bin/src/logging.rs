//! Logging that stays clear of the progress bar.

use anyhow::Result;
use indicatif::ProgressBar;
use log::{Log, Metadata, Record};

/// Writes `env_logger` records with `progress` suspended, so log lines and
/// bar redraws never share a terminal line.
struct ProgressLogger {
    inner: env_logger::Logger,
    progress: ProgressBar,
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if self.inner.matches(record) {
            self.progress.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Installs the global logger with `default_filter` unless `RUST_LOG` is set.
pub(crate) fn init(default_filter: &str, progress: ProgressBar) -> Result<()> {
    let inner = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .build();
    let max_level = inner.filter();

    log::set_boxed_logger(Box::new(ProgressLogger { inner, progress }))?;
    log::set_max_level(max_level);
    Ok(())
}
