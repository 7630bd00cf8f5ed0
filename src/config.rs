//! Monitor configuration with layered resolution.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`PPE_*`)
//! 2. TOML config file (when a path is given)
//! 3. Compiled defaults

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PpeError, Result};
use crate::filtering::date_range::DateRange;

pub const ENV_API_URL: &str = "PPE_API_URL";
pub const ENV_AUTO_REFRESH: &str = "PPE_AUTO_REFRESH";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "PPE_REFRESH_INTERVAL_SECS";
pub const ENV_USE_SAMPLE_DATA: &str = "PPE_USE_SAMPLE_DATA";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PPE_REQUEST_TIMEOUT_SECS";
pub const ENV_DEFAULT_RANGE: &str = "PPE_DEFAULT_RANGE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Records endpoint (the deployed sheet script, or a proxy in front of it).
    pub api_url: String,
    pub auto_refresh: bool,
    pub refresh_interval_secs: u64,
    /// Substitute the sample dataset when a load fails.
    pub use_sample_data: bool,
    pub request_timeout_secs: u64,
    pub default_range: DateRange,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            auto_refresh: true,
            refresh_interval_secs: 60,
            use_sample_data: false,
            request_timeout_secs: 15,
            default_range: DateRange::All,
        }
    }
}

impl MonitorConfig {
    /// Load defaults, then the optional TOML file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PpeError::Config {
            field: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PpeError::Config {
            field: "<toml>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `PPE_*` overrides from a variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url.trim().to_string();
        }
        if let Some(v) = lookup(ENV_AUTO_REFRESH) {
            self.auto_refresh = parse_bool(ENV_AUTO_REFRESH, &v)?;
        }
        if let Some(v) = lookup(ENV_REFRESH_INTERVAL_SECS) {
            self.refresh_interval_secs = parse_secs(ENV_REFRESH_INTERVAL_SECS, &v)?;
        }
        if let Some(v) = lookup(ENV_USE_SAMPLE_DATA) {
            self.use_sample_data = parse_bool(ENV_USE_SAMPLE_DATA, &v)?;
        }
        if let Some(v) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs = parse_secs(ENV_REQUEST_TIMEOUT_SECS, &v)?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_RANGE) {
            self.default_range = v.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() && !self.use_sample_data {
            return Err(PpeError::Config {
                field: "api_url".to_string(),
                message: "required unless use_sample_data is enabled".to_string(),
            });
        }
        if self.refresh_interval_secs == 0 {
            return Err(PpeError::Config {
                field: "refresh_interval_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(PpeError::Config {
                field: "request_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(PpeError::Config {
            field: field.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

fn parse_secs(field: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| PpeError::Config {
        field: field.to_string(),
        message: format!("expected whole seconds, got '{}'", value),
    })
}
