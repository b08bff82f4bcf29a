//! Simulation configuration
//!
//! One RON document describes everything the headless driver needs: the
//! sky, the walkable arena, the spawner and the creature archetypes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::creature::{CreatureProfile, PopulationClass, SpawnerConfig};
use crate::navigation::{BlockedZone, OpenFieldNav};
use crate::world::DayNightConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid creature profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },
    #[error("invalid spawner config: {0}")]
    InvalidSpawner(String),
    #[error("creature profile '{name}' is listed as {expected:?} but its kind says otherwise")]
    WrongKind {
        name: String,
        expected: PopulationClass,
    },
}

/// Walkable area used by the headless driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub min: Vec2,
    pub max: Vec2,
    pub ground_height: f32,
    pub stopping_distance: f32,
    pub blocked: Vec<BlockedZone>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            min: Vec2::splat(-200.0),
            max: Vec2::splat(200.0),
            ground_height: 0.0,
            stopping_distance: OpenFieldNav::DEFAULT_STOPPING_DISTANCE,
            blocked: vec![
                BlockedZone::new(Vec2::new(40.0, 25.0), 12.0),
                BlockedZone::new(Vec2::new(-60.0, -35.0), 8.0),
            ],
        }
    }
}

impl ArenaConfig {
    pub fn build_navigation(&self) -> OpenFieldNav {
        self.blocked.iter().fold(
            OpenFieldNav::new(self.min, self.max)
                .with_ground_height(self.ground_height)
                .with_stopping_distance(self.stopping_distance),
            |nav, zone| nav.with_blocked_zone(*zone),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random decision in the world
    pub seed: u64,
    pub day_night: DayNightConfig,
    pub arena: ArenaConfig,
    pub spawner: SpawnerConfig,
    /// Peaceful archetypes, picked uniformly
    pub wildlife: Vec<CreatureProfile>,
    /// Hostile archetypes, picked uniformly
    pub shadows: Vec<CreatureProfile>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            day_night: DayNightConfig::default(),
            arena: ArenaConfig::default(),
            spawner: SpawnerConfig::default(),
            wildlife: vec![CreatureProfile::deer(), CreatureProfile::rabbit()],
            shadows: vec![CreatureProfile::shadow_creature()],
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading simulation config from {}", path.display());
        Self::from_ron_str(&source)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_ron()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spawner.validate()?;

        let lists = [
            (&self.wildlife, PopulationClass::Peaceful),
            (&self.shadows, PopulationClass::Hostile),
        ];
        for (profiles, expected) in lists {
            for profile in profiles {
                profile.validate()?;
                if profile.class() != expected {
                    return Err(ConfigError::WrongKind {
                        name: profile.name.clone(),
                        expected,
                    });
                }
            }
        }

        if self.wildlife.is_empty() && self.shadows.is_empty() {
            log::warn!("Config has no creature archetypes; nothing will spawn");
        }
        if self.day_night.day_length_minutes.is_nan() || self.day_night.day_length_minutes <= 0.0 {
            log::warn!(
                "day_length_minutes is {}; the clock will barely move",
                self.day_night.day_length_minutes
            );
        }
        Ok(())
    }

    /// Shared archetype handles for the spawner
    pub fn wildlife_archetypes(&self) -> Vec<Arc<CreatureProfile>> {
        self.wildlife.iter().cloned().map(Arc::new).collect()
    }

    pub fn shadow_archetypes(&self) -> Vec<Arc<CreatureProfile>> {
        self.shadows.iter().cloned().map(Arc::new).collect()
    }
}
