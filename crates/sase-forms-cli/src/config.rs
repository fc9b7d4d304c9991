//! CLI Configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sase_forms::FormsConfig;

/// Load the engine config from `explicit`, or from the default location
pub fn load(explicit: Option<&Path>) -> Result<FormsConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_path()?,
    };
    FormsConfig::load(&path).with_context(|| format!("reading config {}", path.display()))
}

fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Cannot find home directory")?;
    Ok(home.join(".opensase").join("forms.toml"))
}
