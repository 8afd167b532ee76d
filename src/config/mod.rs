//! Configuration management for c2clog

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/c2clog/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/c2clog)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit file, or the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => io::load_from(path),
            None => Self::load(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Evaluation log expected next to `primary`
    pub fn evaluation_log_for(&self, primary: &Path) -> PathBuf {
        sibling(primary, &self.input.evaluation_log)
    }

    /// Annotated output path for `primary`
    pub fn annotated_log_for(&self, primary: &Path) -> PathBuf {
        sibling(primary, &self.output.annotated_log)
    }

    /// Export directory for an annotated log at `annotated`
    pub fn export_dir_for(&self, annotated: &Path) -> PathBuf {
        sibling(annotated, &self.output.json_dir)
    }
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
