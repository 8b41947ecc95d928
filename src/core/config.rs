//! User configuration - defaults applied beneath worksheet and command-line values

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entities::settings::{
    DEFAULT_FIXED_COST, DEFAULT_MAX_TARGET_MARGIN, DEFAULT_TARGET_MARGIN,
};
use crate::entities::GlobalSettings;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "PRICECALC_CONFIG";

/// Number of placeholder products in a new worksheet
pub const DEFAULT_PRODUCT_COUNT: usize = 3;

/// Configuration loaded from `config.yaml`
///
/// Every key is optional; the accessor methods supply the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default monthly fixed cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_cost: Option<f64>,

    /// Default target margin (fraction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_margin: Option<f64>,

    /// Placeholder products written by `pricecalc new`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<usize>,

    /// Currency label appended to money amounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Highest target margin accepted from input (at most 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_target_margin: Option<f64>,
}

impl Config {
    /// Load the user config, falling back to defaults
    ///
    /// A missing file is normal. An unreadable or malformed one is reported
    /// with a warning and ignored.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };

        match serde_yml::from_str::<Option<Config>>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config.unwrap_or_default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Config file location: `$PRICECALC_CONFIG`, else the platform config dir
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "pricecalc").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost.unwrap_or(DEFAULT_FIXED_COST)
    }

    pub fn target_margin(&self) -> f64 {
        self.target_margin.unwrap_or(DEFAULT_TARGET_MARGIN)
    }

    pub fn product_count(&self) -> usize {
        self.product_count.unwrap_or(DEFAULT_PRODUCT_COUNT)
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Margin ceiling, clamped to [0, 1]
    pub fn max_target_margin(&self) -> f64 {
        let max = self.max_target_margin.unwrap_or(DEFAULT_MAX_TARGET_MARGIN);
        if max.is_finite() {
            max.clamp(0.0, 1.0)
        } else {
            DEFAULT_MAX_TARGET_MARGIN
        }
    }

    /// Settings to use when a worksheet does not provide them
    pub fn default_settings(&self) -> GlobalSettings {
        GlobalSettings::new(self.fixed_cost(), self.target_margin())
    }
}
