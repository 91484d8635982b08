//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_static::SiteBuilder;

use crate::config::{load_build_config, Overrides};

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = load_build_config(config_path, &Overrides { output, minify })?;

    let result = SiteBuilder::new(config)
        .build()
        .await
        .context("Build failed")?;

    tracing::info!(
        "Built {} pages ({} posts), {} utility classes, {} assets in {}ms",
        result.pages,
        result.posts,
        result.css_classes,
        result.assets,
        result.duration_ms
    );
    if result.images_resized > 0 {
        tracing::info!("Downscaled {} images", result.images_resized);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
