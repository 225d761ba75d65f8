//! Print the browser-side navigation script.

use std::path::Path;

use anyhow::Result;

use crate::config;

/// Run the script command.
pub fn run(config_path: &Path) -> Result<()> {
    let settings = config::load(config_path)?;
    print!("{}", sitenav_nav::client_script(&settings.nav)?);
    Ok(())
}
