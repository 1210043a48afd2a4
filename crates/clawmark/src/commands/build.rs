//! Site build command.

use std::path::PathBuf;

use anyhow::Result;
use clawmark_static::{BuildConfig, SiteBuilder};

/// Run the build command.
pub fn run(config_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("ClawMark generator starting...");

    let defaults = BuildConfig::default();
    let config = BuildConfig {
        config_path,
        output_dir: output.unwrap_or_else(|| defaults.output_dir.clone()),
        ..defaults
    };

    let result = SiteBuilder::new(config).build()?;

    tracing::info!("Site generated in {}ms", result.duration_ms);
    tracing::info!("Output location: {}", result.index_path.display());
    tracing::info!("Theme used: {}", result.theme);
    tracing::info!("Generation complete! Open {} in your browser.", result.index_path.display());

    Ok(())
}
