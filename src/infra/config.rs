// src/infra/config.rs - Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::types::{LoopConfig, DEFAULT_MAX_STEP};
use crate::infra::errors::ReflectError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, rename = "loop")]
    pub refine: RefineConfig,
}

/// The `[loop]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    pub target: f64,
    /// Values below 1 are coerced to 1.
    pub max_iterations: i64,
    pub tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<f64>,
    pub max_step: f64,
    /// Fixed seed for reproducible runs. Unset draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            target: 0.65,
            max_iterations: 10,
            tolerance: 0.05,
            initial_value: None,
            max_step: DEFAULT_MAX_STEP,
            seed: None,
        }
    }
}

impl RefineConfig {
    /// Validate and convert into the engine's config.
    ///
    /// Only `max_step` is checked; target, tolerance and initial value are
    /// taken as given.
    pub fn to_loop_config(&self) -> Result<LoopConfig, ReflectError> {
        if !self.max_step.is_finite() || self.max_step < 0.0 {
            return Err(ReflectError::config(format!(
                "max_step must be a finite non-negative number, got {}",
                self.max_step
            )));
        }

        let mut cfg = LoopConfig::new(self.target, self.max_iterations, self.tolerance)
            .with_max_step(self.max_step);
        cfg.initial_value = self.initial_value;
        Ok(cfg)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, ReflectError> {
        match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ReflectError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| ReflectError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReflectError> {
        Ok(toml::to_string(self)?)
    }
}
