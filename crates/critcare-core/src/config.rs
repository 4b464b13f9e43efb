//! Store configuration and validation.

use serde::{Deserialize, Serialize};

use crate::persistence::PersistError;

/// Upper bound on retained history points.
pub const MAX_HISTORY_LIMIT: usize = 10_000;

/// Runtime options for [`crate::store::SimulationStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of trend points kept; older points are dropped first.
    pub history_limit: usize,
    /// Re-run renal perfusion after every action that moves the vitals.
    pub couple_renal_perfusion: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            couple_renal_perfusion: true,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// History must keep at least one point.
    HistoryLimitZero,
    /// History limit above [`MAX_HISTORY_LIMIT`].
    HistoryLimitTooLarge(usize),
}

impl StoreConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration, returning all errors found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.history_limit == 0 {
            errors.push(ConfigError::HistoryLimitZero);
        }
        if self.history_limit > MAX_HISTORY_LIMIT {
            errors.push(ConfigError::HistoryLimitTooLarge(self.history_limit));
        }

        errors
    }
}
