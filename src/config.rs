//! API configuration model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, time::Duration};

/// Transport configuration stored in `config.toml`.
///
/// Loaded once at startup and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal backend API.
    pub base_url: String,
    /// Timeout applied to ordinary JSON requests, in milliseconds.
    pub default_timeout_ms: u64,
    /// Timeout applied to multipart file uploads, in milliseconds.
    pub upload_timeout_ms: u64,
    /// Extra headers attached to every request.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

impl ApiConfig {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    /// Timeout tier for ordinary requests.
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Timeout tier for file uploads.
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }
}

impl Default for ApiConfig {
    /// Defaults match the staging backend and its nginx upload limits.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".into(),
            default_timeout_ms: 30_000,
            upload_timeout_ms: 300_000,
            default_headers: BTreeMap::new(),
        }
    }
}
