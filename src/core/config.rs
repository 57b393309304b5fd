use crate::core::currency::DEFAULT_REFERENCE_CURRENCY;
use crate::core::inflation::{AdjustmentPolicy, DEFAULT_CURRENT_WINDOW_DAYS};
use crate::core::valuation::DEFAULT_MIN_YEAR;
use anyhow::{Context, Result, bail};
use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatasetsConfig {
    pub price_index: String,
    pub exchange_rates: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ValuationConfig {
    #[serde(default = "default_current_window_days")]
    pub current_window_days: i64,
    #[serde(default)]
    pub reference_window_days: Option<i64>,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

fn default_current_window_days() -> i64 {
    DEFAULT_CURRENT_WINDOW_DAYS
}

fn default_min_year() -> i32 {
    DEFAULT_MIN_YEAR
}

fn default_reference_currency() -> String {
    DEFAULT_REFERENCE_CURRENCY.to_string()
}

impl Default for ValuationConfig {
    fn default() -> Self {
        ValuationConfig {
            current_window_days: DEFAULT_CURRENT_WINDOW_DAYS,
            reference_window_days: None,
            min_year: DEFAULT_MIN_YEAR,
        }
    }
}

impl ValuationConfig {
    /// Tolerance windows as durations. Windows must be non-negative and fit
    /// in a `chrono::Duration`.
    pub fn policy(&self) -> Result<AdjustmentPolicy> {
        Ok(AdjustmentPolicy {
            current_window: window("current_window_days", self.current_window_days)?,
            reference_window: self
                .reference_window_days
                .map(|days| window("reference_window_days", days))
                .transpose()?,
        })
    }
}

fn window(name: &str, days: i64) -> Result<Duration> {
    if days < 0 {
        bail!("valuation.{name} must not be negative, got {days}");
    }
    Duration::try_days(days).with_context(|| format!("valuation.{name} is too large: {days}"))
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub valuation: ValuationConfig,
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
    pub data_path: Option<String>,
    /// Directory of the file this config was read from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "storyval", "storyval")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(self.resolve(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "storyval", "storyval")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn price_index_path(&self) -> PathBuf {
        self.resolve(&self.datasets.price_index)
    }

    pub fn exchange_rates_path(&self) -> PathBuf {
        self.resolve(&self.datasets.exchange_rates)
    }

    /// Relative paths are taken from the config file's directory.
    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.valuation.policy().with_context(|| {
            format!("Invalid valuation settings in {}", path.as_ref().display())
        })?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        debug!("Successfully loaded config");
        Ok(config)
    }
}
