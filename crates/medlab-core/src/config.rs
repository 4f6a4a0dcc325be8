//! Session configuration, read from a TOML file.
//!
//! ```toml
//! role = "franchise"
//! landing = "billing/history"
//! currency_symbol = "₹"
//! seed_demo_data = true
//! log_filter = "medlab_core=debug"
//! recent_reports = 4
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::access::Role;
use crate::format::RUPEE;
use crate::views::ModuleSelector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Viewer role for the whole session
    pub role: Role,
    /// Selector shown first, e.g. `dashboard` or `billing/history`
    pub landing: String,
    pub currency_symbol: String,
    /// Load the demo collections at startup
    pub seed_demo_data: bool,
    /// `tracing` filter directive
    pub log_filter: String,
    /// Reports listed on the dashboard home
    pub recent_reports: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            role: Role::Admin,
            landing: "dashboard".to_string(),
            currency_symbol: RUPEE.to_string(),
            seed_demo_data: true,
            log_filter: "medlab_core=info".to_string(),
            recent_reports: 4,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid dashboard configuration")
    }

    /// Load configuration when the file exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn landing_selector(&self) -> ModuleSelector {
        self.landing.parse().unwrap_or_default()
    }

    /// The `log_filter` directive, parsed.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_filter)
            .with_context(|| format!("Invalid log filter {:?}", self.log_filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.landing_selector(), ModuleSelector::dashboard());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "role = \"franchise\"").unwrap();
        writeln!(file, "landing = \"billing/ledger\"").unwrap();
        writeln!(file, "recent_reports = 2").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.role, Role::Franchise);
        assert_eq!(
            config.landing_selector(),
            ModuleSelector::new("billing", Some("ledger"))
        );
        assert_eq!(config.recent_reports, 2);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let err = DashboardConfig::from_toml("role = \"owner\"").unwrap_err();
        assert!(format!("{err:#}").contains("Invalid dashboard configuration"));
    }

    #[test]
    fn test_log_filter() {
        let config = DashboardConfig::default();
        assert!(config.env_filter().is_ok());

        let config = DashboardConfig::from_toml("log_filter = \"medlab_core=loud\"").unwrap();
        let err = config.env_filter().unwrap_err();
        assert!(err.to_string().contains("Invalid log filter"));
    }

    #[test]
    fn test_missing_file_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medlab.toml");

        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.role, Role::Admin);
    }
}
