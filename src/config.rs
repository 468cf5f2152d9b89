use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::strategy::Strategy;
use crate::{rlog_debug, Error, Result};

const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strategy name used when none is given on the command line or in the request.
    pub default_strategy: String,
    pub recommendation_limit: usize,
    /// Fail on dependency ids that name no task in the batch.
    pub strict_dependencies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::default().name().to_string(),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            strict_dependencies: false,
        }
    }
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".taskrank"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("taskrank.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        rlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            rlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        rlog_debug!(
            "Config loaded: default_strategy={:?}, recommendation_limit={}, strict_dependencies={}",
            config.default_strategy,
            config.recommendation_limit,
            config.strict_dependencies
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                rlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        rlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Reject settings that would make commands useless.
    pub fn validate(&self) -> Result<()> {
        if self.recommendation_limit == 0 {
            return Err(Error::Validation(
                "recommendation_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured default strategy; unknown names mean Smart Balance.
    pub fn strategy(&self) -> Strategy {
        Strategy::from_name(&self.default_strategy)
    }
}
