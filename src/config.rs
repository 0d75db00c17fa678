//! Configuration Management
//!
//! Persistent settings for an inventory collection run. Everything has a
//! working default; a missing or unreadable file is not an error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CollectorConfig {
    /// Vendor call starts admitted per second across the process
    #[serde(default)]
    pub rate_limit: Option<u32>,
    /// ARM endpoint override (sovereign clouds)
    #[serde(default)]
    pub management_endpoint: Option<String>,
    /// Default Alibaba Cloud region
    #[serde(default)]
    pub aliyun_region: Option<String>,
}

impl CollectorConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cloudskim").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Effective admission rate (config > built-in default)
    pub fn effective_rate_limit(&self) -> u32 {
        self.rate_limit
            .unwrap_or(crate::throttle::DEFAULT_RATE_PER_SECOND)
    }

    /// Effective ARM endpoint (config > public cloud)
    pub fn effective_management_endpoint(&self) -> String {
        self.management_endpoint
            .clone()
            .unwrap_or_else(|| crate::azure::DEFAULT_ENDPOINT.to_string())
    }

    /// Effective Alibaba Cloud region (config > built-in default)
    pub fn effective_aliyun_region(&self) -> String {
        self.aliyun_region
            .clone()
            .unwrap_or_else(|| crate::aliyun::DEFAULT_REGION.to_string())
    }
}
