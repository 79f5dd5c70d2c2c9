//! Show-config command implementation.

use anyhow::Result;
use taifex_pipeline::PipelineConfig;

/// Print the effective configuration as pretty JSON.
pub(crate) fn show_config(config: &PipelineConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
