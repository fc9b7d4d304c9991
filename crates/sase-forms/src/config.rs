//! Engine configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::FormType;
use crate::infrastructure::StaticSchemaCatalog;
use crate::{FormsError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Form type shown on startup
    pub initial_form_type: String,
    /// Simulated schema fetch latency
    pub schema_latency_ms: u64,
    pub toast_duration_ms: u64,
    /// JSON catalog replacing the built-in forms
    pub schema_file: Option<PathBuf>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            initial_form_type: "userInfo".to_string(),
            schema_latency_ms: 500,
            toast_duration_ms: 3000,
            schema_file: None,
        }
    }
}

impl FormsConfig {
    /// Read a TOML config; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FormsError::Config(e.to_string()))
    }

    pub fn initial_form_type(&self) -> FormType {
        FormType::from(self.initial_form_type.as_str())
    }

    pub fn schema_latency(&self) -> Duration {
        Duration::from_millis(self.schema_latency_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Schema catalog described by this config, with its latency applied
    pub fn catalog(&self) -> Result<StaticSchemaCatalog> {
        let catalog = match &self.schema_file {
            Some(path) => StaticSchemaCatalog::from_file(path)?,
            None => StaticSchemaCatalog::builtin(),
        };
        Ok(catalog.with_latency(self.schema_latency()))
    }
}
