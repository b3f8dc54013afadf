//! Scan configuration
//!
//! Every option defaults to the production behavior. `baseline()` turns
//! off the optimizations so results can be cross-checked against the
//! plain filter-everything path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{Logger, Severity};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown log severity: {0}")]
    InvalidSeverity(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Options for [`TableScanner`](crate::scan::TableScanner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Use column bounds to shrink the candidate row range.
    pub bound_pruning: bool,
    /// Skip the sort when natural row order already satisfies ORDER BY.
    pub natural_order_sort_elision: bool,
    /// Minimum logger severity, by name.
    pub log_severity: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bound_pruning: true,
            natural_order_sort_elision: true,
            log_severity: Severity::Warn.as_str().to_string(),
        }
    }
}

impl ScanConfig {
    /// Config with every optimization enabled.
    pub fn enabled() -> Self {
        Self::default()
    }

    /// Config with pruning and sort elision disabled.
    pub fn baseline() -> Self {
        Self {
            bound_pruning: false,
            natural_order_sort_elision: false,
            ..Self::default()
        }
    }

    /// Parses a JSON config document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.severity()?;
        Ok(config)
    }

    /// Resolves the configured severity name.
    pub fn severity(&self) -> ConfigResult<Severity> {
        Severity::parse(&self.log_severity)
            .ok_or_else(|| ConfigError::InvalidSeverity(self.log_severity.clone()))
    }

    /// Applies the configured severity to the process-wide logger.
    pub fn install_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }
}
