// config.rs - Run configuration, loadable from YAML

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::CELL_SIZE;
use crate::seed::DEFAULT_DENSITY;

pub const MIN_TICK_MS: u64 = 100;
pub const MAX_TICK_MS: u64 = 2000;
/// How often the pre-run scene (and its clock) is rebuilt.
pub const SETUP_REFRESH_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Pixel edge of one cell
    pub cell_size: u32,
    /// Time between generations, clamped to 100..=2000 ms
    pub tick_interval_ms: u64,
    /// Chance that an open body cell starts alive when seeding randomly
    pub random_density: f64,
    /// Fixes every random draw (seeding and birth colors) when set
    pub rng_seed: Option<u64>,
    pub title: String,
    pub confirm_label: String,
    /// Picture sampled into the setup scene, if any
    pub image_path: Option<PathBuf>,
    /// Canvas size used when there is no window
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            tick_interval_ms: 500,
            random_density: DEFAULT_DENSITY,
            rng_seed: None,
            title: "LIFE GAME".to_string(),
            confirm_label: "OK".to_string(),
            image_path: None,
            viewport: ViewportConfig::default(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 1280.0, height: 800.0 }
    }
}

impl LifeConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LifeConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be non-zero".to_string()));
        }
        if !(self.viewport.width >= 1.0 && self.viewport.height >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport {}x{} must be at least one pixel each way",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(0.0..=1.0).contains(&self.random_density) {
            return Err(ConfigError::Invalid(format!(
                "random_density {} is outside 0..=1",
                self.random_density
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        clamp_tick(self.tick_interval_ms)
    }
}

pub fn clamp_tick(millis: u64) -> Duration {
    Duration::from_millis(millis.clamp(MIN_TICK_MS, MAX_TICK_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = LifeConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = LifeConfig::from_yaml_str("cell_size: 4\nrng_seed: 12\nviewport:\n  width: 640\n").unwrap();
        assert_eq!(config.cell_size, 4);
        assert_eq!(config.rng_seed, Some(12));
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 800.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(LifeConfig::from_yaml_str("cell_size: 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(LifeConfig::from_yaml_str("random_density: 1.5"), Err(ConfigError::Invalid(_))));
        assert!(matches!(LifeConfig::from_yaml_str("cell_size: [1"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn tick_is_clamped() {
        assert_eq!(clamp_tick(5), Duration::from_millis(100));
        assert_eq!(clamp_tick(750), Duration::from_millis(750));
        assert_eq!(clamp_tick(60_000), Duration::from_millis(2000));
    }

    #[test]
    fn yaml_file_round_trip() {
        let path = std::env::temp_dir().join(format!("zone_life_config_{}.yaml", std::process::id()));
        let mut config = LifeConfig::default();
        config.title = "HELLO".to_string();
        config.to_yaml(&path).unwrap();
        let loaded = LifeConfig::from_yaml(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LifeConfig::from_yaml("/nonexistent/zone_life.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/zone_life.yaml"));
    }
}
