//! Directory page generation command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitenav_directory::{DirectoryError, DirectoryGenerator, ErrorCategory};

use crate::config;

/// Run the generate command.
pub fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Generating directory page...");

    let mut settings = config::load(config_path)?;
    if let Some(output) = output {
        settings.directory.output = output;
    }
    tracing::debug!("Using {} layout", settings.layout.as_str());

    match DirectoryGenerator::new(settings.directory).generate() {
        Ok(report) => {
            tracing::info!(
                "Listed {} pages ({} excluded)",
                report.pages,
                report.excluded.len()
            );
            tracing::info!("Directory updated: {}", report.output.display());
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            anyhow::bail!("Directory page was not updated")
        }
    }
}

/// Log a categorised diagnostic for a failed run.
fn report_failure(err: &DirectoryError) {
    tracing::error!("An error occurred during directory generation");

    match (err.category(), err) {
        (ErrorCategory::NotFound, DirectoryError::NotFound(path)) => {
            tracing::error!("File not found: {}", path.display());
        }
        (ErrorCategory::Configuration, _) => {
            tracing::error!("Configuration error: {}", err);
        }
        _ => {
            tracing::error!("An unexpected error occurred: {}", err);
        }
    }
}
