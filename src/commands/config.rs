//! Config subcommands handler

use anyhow::Result;
use std::path::{Path, PathBuf};

use c2clog::Config;

/// Config file in use: the `--config` override or the default location.
pub fn config_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config, path: Option<&Path>) -> Result<()> {
    let path = config_file(path)?;
    let origin = if path.exists() { "" } else { " (not found, defaults)" };
    println!("# {}{}", path.display(), origin);
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration unless a file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: Option<&Path>) -> Result<()> {
    let path = config_file(path)?;
    if init_at(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists: {}", path.display());
    }
    Ok(())
}

/// Returns false when `path` already exists.
fn init_at(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}
