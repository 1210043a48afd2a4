//! Open Graph image command.

use std::path::Path;

use anyhow::{Context, Result};

/// Run the preview image generator.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!("ClawMark Open Graph image generator");
    tracing::info!("Using config: {}", config_path.display());

    clawmark_og::ensure_raster_support()?;

    let report = clawmark_og::create_og_image(config_path)
        .context("Failed to create Open Graph image")?;

    tracing::info!("Created Open Graph image: {}", report.output.display());
    tracing::info!("  Title: {}", report.title);
    tracing::info!("  Subtitle: {}", report.subtitle);
    if !report.description.is_empty() {
        tracing::info!("  Description: {}", report.description);
    }
    tracing::info!("  Dimensions: {}x{}", report.width, report.height);

    Ok(())
}
