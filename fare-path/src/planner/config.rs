//! Planner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error loading or validating a `PathConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Limits applied while building a path matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Maximum number of top-level markets per path.
    /// Longer paths are dropped before side trips are expanded.
    pub max_markets_per_path: Option<usize>,

    /// Maximum number of paths in the final matrix.
    /// Larger matrices are sampled across fare-break counts.
    pub max_paths: Option<usize>,
}

impl PathConfig {
    /// Create a new configuration with the given limits.
    pub fn new(max_markets_per_path: Option<usize>, max_paths: Option<usize>) -> Self {
        Self {
            max_markets_per_path,
            max_paths,
        }
    }

    pub fn with_max_markets_per_path(mut self, max: usize) -> Self {
        self.max_markets_per_path = Some(max);
        self
    }

    pub fn with_max_paths(mut self, max: usize) -> Self {
        self.max_paths = Some(max);
        self
    }

    /// Parses and validates a JSON configuration. Missing fields are unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_path::planner::PathConfig;
    ///
    /// let config = PathConfig::from_json_str(r#"{"max_markets_per_path": 6}"#).unwrap();
    /// assert_eq!(config.max_markets_per_path, Some(6));
    /// assert_eq!(config.max_paths, None);
    /// ```
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: PathConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects a zero path cap, which cannot keep one path per group.
    ///
    /// A market budget of zero is accepted and removes every path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_paths == Some(0) {
            return Err(ConfigError::Invalid(
                "max_paths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Market-count budget derived from the number of flown legs: the product of
/// `max_markets_per_leg` and `leg_count`, but never below 3.
///
/// Callers choosing a budget per itinerary can feed this into
/// `PathConfig::max_markets_per_path`.
pub fn complexity_budget(max_markets_per_leg: usize, leg_count: usize) -> usize {
    max_markets_per_leg.saturating_mul(leg_count).max(3)
}
