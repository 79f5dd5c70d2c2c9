//! Explicit run context shared by the pipeline stages.

use crate::{ConfigError, PipelineConfig};
use std::fs;
use taifex_format::KlineFormatter;
use taifex_ingest::TickParser;

/// Everything a pipeline stage needs, built once per run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    config: PipelineConfig,
    parser: TickParser,
    formatter: KlineFormatter,
}

impl PipelineContext {
    /// Creates a context from a configuration.
    ///
    /// Validates the configuration and creates the archive, report and
    /// K-line stores if they don't exist. The download directory is only
    /// ever read and is not created.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or a store cannot be created.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        for path in [&config.zip_dir, &config.csv_dir, &config.kline_dir] {
            if !path.exists() {
                fs::create_dir_all(path).map_err(|e| ConfigError::CreateDir {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }

        let parser = TickParser::new(config.symbols.clone());
        Ok(Self {
            config,
            parser,
            formatter: KlineFormatter::new(),
        })
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the report line parser.
    #[must_use]
    pub const fn parser(&self) -> &TickParser {
        &self.parser
    }

    /// Returns the K-line formatter.
    #[must_use]
    pub const fn formatter(&self) -> &KlineFormatter {
        &self.formatter
    }
}
