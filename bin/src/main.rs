//! taifex-kline CLI - TAIFEX daily tick reports to 1-minute K-lines.

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::PathBuf;
use taifex_pipeline::{PipelineConfig, PipelineContext};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "taifex-kline")]
#[command(about = "Convert TAIFEX daily tick reports into 1-minute K-lines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the browser downloads archives into
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    /// Archive store
    #[arg(long, global = true)]
    zip_dir: Option<PathBuf>,

    /// Extracted report store
    #[arg(long, global = true)]
    csv_dir: Option<PathBuf>,

    /// K-line output directory
    #[arg(long, global = true)]
    kline_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage, extract and convert every downloaded archive
    Run,

    /// Copy downloaded archives into the archive store
    Stage,

    /// Stage archives and extract their reports
    Extract,

    /// Convert the given report files
    Convert {
        /// Report files (e.g. Daily_2024_01_15.csv)
        #[arg(required = true)]
        reports: Vec<PathBuf>,
    },

    /// Print the effective configuration as JSON
    ShowConfig,
}

impl Cli {
    /// Loads the configuration file, if any, and applies directory overrides.
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(dir) = &self.download_dir {
            config.download_dir.clone_from(dir);
        }
        if let Some(dir) = &self.zip_dir {
            config.zip_dir.clone_from(dir);
        }
        if let Some(dir) = &self.csv_dir {
            config.csv_dir.clone_from(dir);
        }
        if let Some(dir) = &self.kline_dir {
            config.kline_dir.clone_from(dir);
        }

        Ok(config)
    }

    const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // drawn only once a command gives it a length
    let progress = ProgressBar::hidden();
    logging::init(cli.log_filter(), progress.clone())?;

    let config = cli.pipeline_config()?;
    if matches!(cli.command, Commands::ShowConfig) {
        return commands::config::show_config(&config);
    }

    let context = PipelineContext::new(config)?;
    match cli.command {
        Commands::Run => commands::run::run(&context, &progress, cli.quiet),
        Commands::Stage => commands::run::stage(&context),
        Commands::Extract => commands::run::extract(&context),
        Commands::Convert { reports } => {
            commands::convert::convert(&context, &reports, &progress, cli.quiet)
        }
        Commands::ShowConfig => Ok(()),
    }
}
