//! Configuration for rate limiters.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{Result, SluiceError};

/// Default sliding window length in seconds.
fn default_window_secs() -> u64 {
    60
}

/// Default number of accepted consumptions per window.
fn default_limit() -> u64 {
    60
}

/// Configuration for a single rate limiter.
///
/// `name` namespaces the limiter's storage keys, so two limiters sharing one
/// cache never collide unless they are configured with the same name — in
/// which case they intentionally act as one logical limiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Discriminator namespacing this limiter's keys in the shared cache
    pub name: String,

    /// Sliding window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum accepted consumptions per window per key
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl RateLimiterConfig {
    /// Create a configuration with explicit values.
    pub fn new(name: impl Into<String>, window_secs: u64, limit: u64) -> Self {
        Self {
            name: name.into(),
            window_secs,
            limit,
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading rate limiter configuration");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SluiceError::Config(format!("Failed to parse rate limiter config: {}", e)))
    }

    /// Check that the configuration describes a usable limiter.
    ///
    /// Validated once here so the per-call hot path never re-checks.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(SluiceError::Config(
                "Rate limiter name must not be empty".to_string(),
            ));
        }
        if self.window_secs == 0 {
            return Err(SluiceError::Config(
                "Window length must be at least one second".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(SluiceError::Config(
                "Limit must be at least one".to_string(),
            ));
        }
        Ok(())
    }
}
