use anyhow::{Result, bail};

use crate::config;

/// `pixelcheck init` — create pixelcheck.toml.
pub fn init(force: bool) -> Result<()> {
    if !force && config::config_file_exists() {
        bail!("pixelcheck.toml already exists (use --force to overwrite)");
    }

    config::write_template()?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} pixelcheck.toml");
    Ok(())
}
