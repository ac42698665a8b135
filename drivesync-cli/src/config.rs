//! Config file loading.
//!
//! Precedence is defaults, then the config file, then flags and environment.

use anyhow::{Context, Result};
use drivesync_drive::DriveConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub drive: DriveConfig,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl CliConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Loads the file if given, then applies token overrides.
    pub fn resolve(
        path: Option<&Path>,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_tokens(access_token, refresh_token))
    }

    /// Replaces tokens that are given.
    #[must_use]
    pub fn with_tokens(mut self, access_token: Option<String>, refresh_token: Option<String>) -> Self {
        if access_token.is_some() {
            self.access_token = access_token;
        }
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
        self
    }
}
