//! Configuration for the distiller

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::filter::StatusMatching;
use crate::status::{CanonicalStatus, StatusSelection};

pub const DEFAULT_OWNER: &str = "Haugaard";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5 * 60;

/// Main distiller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistillerConfig {
    /// Records are only shown when their owner column equals this exactly
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Idle time after which held spreadsheet data is discarded
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Statuses selected on a fresh session
    #[serde(default = "default_statuses")]
    pub default_statuses: Vec<CanonicalStatus>,
    #[serde(default)]
    pub status_matching: StatusMatching,
}

impl DistillerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DistillerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            anyhow::bail!("Configuration error: 'owner' must not be blank");
        }
        if self.owner.trim() != self.owner {
            anyhow::bail!(
                "Configuration error: 'owner' has surrounding whitespace ('{}'); owners are compared exactly",
                self.owner
            );
        }
        if self.idle_timeout_secs == 0 {
            anyhow::bail!("Configuration error: 'idle_timeout_secs' must be greater than zero");
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn initial_selection(&self) -> StatusSelection {
        self.default_statuses.iter().copied().collect()
    }
}

impl Default for DistillerConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            idle_timeout_secs: default_idle_timeout_secs(),
            default_statuses: default_statuses(),
            status_matching: StatusMatching::default(),
        }
    }
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

fn default_statuses() -> Vec<CanonicalStatus> {
    StatusSelection::initial().iter().collect()
}
