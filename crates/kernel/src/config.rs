use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skyline_ecs::EcsError;
use skyline_input::ActionMap;
use skyline_physics::PhysicsConfig;
use skyline_world::{LayoutError, WorldConfig};

use crate::player::PlayerConfig;

/// Everything needed to build a [`crate::World`]. Every section is optional
/// in YAML; missing fields fall back to their defaults. A `bindings` section
/// replaces the default key bindings as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkylineConfig {
    pub physics: PhysicsConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub bindings: ActionMap,
    /// Upper bound on a single frame's delta time, in seconds.
    pub max_dt: f32,
}

impl Default for SkylineConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            bindings: ActionMap::default(),
            max_dt: 0.1,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("world: {0}")]
    World(#[from] LayoutError),
    #[error("player: {0}")]
    Player(#[from] EcsError),
    #[error("max_dt must be positive, got {0}")]
    MaxDt(f32),
}

impl SkylineConfig {
    /// Parse and validate.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serialize the effective configuration.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.player.validate()?;
        if self.max_dt.is_nan() || self.max_dt <= 0.0 {
            return Err(ConfigError::MaxDt(self.max_dt));
        }
        Ok(())
    }
}
