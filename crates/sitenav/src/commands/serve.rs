//! Preview server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitenav_server::{PreviewConfig, PreviewServer};

use crate::config;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    dir: Option<PathBuf>,
    watch: bool,
    open: bool,
) -> Result<()> {
    let settings = config::load(config_path)?;

    let root = dir.unwrap_or(settings.site_root);
    if !root.is_dir() {
        anyhow::bail!("Directory not found: {}", root.display());
    }

    let config = PreviewConfig {
        root,
        port: port.unwrap_or(settings.port),
        host: settings.host,
        open,
        nav: settings.nav,
        watch: watch.then_some(settings.directory),
    };

    tracing::info!("Starting preview server on port {}", config.port);

    PreviewServer::new(config).start().await?;

    Ok(())
}
