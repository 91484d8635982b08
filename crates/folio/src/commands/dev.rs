//! Development server command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use folio_server::{ConfigLoader, DevServer, DevServerConfig};

use crate::config::{load_build_config, Overrides};

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let build = load_build_config(config_path, &Overrides::default())?;

    let path = config_path.to_path_buf();
    let loader: ConfigLoader = Arc::new(move || {
        load_build_config(&path, &Overrides::default()).map_err(|e| format!("{e:#}"))
    });

    let config = DevServerConfig {
        build,
        config_path: Some(config_path.to_path_buf()),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config)
        .with_config_loader(loader)
        .start()
        .await?;

    Ok(())
}
