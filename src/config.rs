// ⚙️ Dashboard Configuration - Config as Data
// Commission rates and data location live in a JSON file, never in code.
//
// Example (every field optional):
// {
//   "commission": { "sales_rate": "0.15", "delivery_rate": "0.25" },
//   "data_dir": "data",
//   "user_id": "4f0c..."
// }

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::commission::CommissionRates;
use crate::error::{DashboardError, DashboardResult};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Commission rates (defaults: 15% VSS, 25% personal VSD)
    pub commission: CommissionRates,

    /// Directory holding the CSV table exports
    pub data_dir: PathBuf,

    /// Tenant whose records are aggregated (None = every row in the export)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            commission: CommissionRates::default(),
            data_dir: default_data_dir(),
            user_id: None,
        }
    }
}

impl DashboardConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(DashboardError::from)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config = Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;

        log::info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_json(json: &str) -> DashboardResult<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// File if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.commission.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.commission, CommissionRates::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.user_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = DashboardConfig::from_json("{}").unwrap();

        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_full_json() {
        let config = DashboardConfig::from_json(
            r#"{
                "commission": { "sales_rate": "0.12", "delivery_rate": "0.3" },
                "data_dir": "/srv/dashboard",
                "user_id": "user-1"
            }"#,
        )
        .unwrap();

        assert_eq!(config.commission.sales_rate, dec!(0.12));
        assert_eq!(config.commission.delivery_rate, dec!(0.3));
        assert_eq!(config.data_dir, PathBuf::from("/srv/dashboard"));
        assert_eq!(config.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_rejects_invalid_rates() {
        let result = DashboardConfig::from_json(r#"{ "commission": { "sales_rate": "2" } }"#);

        assert!(matches!(result, Err(DashboardError::InvalidRate { .. })));
    }

    #[test]
    fn test_rejects_high_precision_rates() {
        let result = DashboardConfig::from_json(
            r#"{ "commission": { "sales_rate": "0.1234567890123456789012345" } }"#,
        );

        assert!(matches!(
            result,
            Err(DashboardError::InvalidRate { ref name, .. }) if name == "sales_rate"
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            DashboardConfig::from_json("{ not json"),
            Err(DashboardError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::from_file("/definitely/not/here.json").unwrap_err();

        assert!(matches!(err.downcast_ref::<DashboardError>(), Some(DashboardError::Io(_))));
        assert!(err.to_string().contains("Failed to read config file"));
        assert!(DashboardConfig::load_or_default(None).is_ok());
    }
}
