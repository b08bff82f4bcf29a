//! Creature spawning and population control
//!
//! Keeps two bounded populations (peaceful wildlife, hostile shadows) topped
//! up around the player. Hostiles only spawn at night.

use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec3;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::{DeathNotice, Environment};
use super::creature::Creature;
use super::profile::{CreatureProfile, PopulationClass};
use crate::config::ConfigError;
use crate::entity::EntityId;
use crate::navigation::{random_in_ring, Navigation};
use crate::SimRng;

/// Candidate points tried per spawn attempt
pub const SPAWN_POINT_ATTEMPTS: usize = 10;
/// Search distance used when snapping a spawn candidate
pub const SPAWN_SNAP_DISTANCE: f32 = 5.0;

/// Every live creature, keyed by id. Ordered so updates consume RNG reproducibly.
pub type CreatureMap = BTreeMap<EntityId, Creature>;

/// Tuning for one population class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub max_population: usize,
    /// Outer radius of the spawn ring around the player
    pub spawn_radius: f32,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub peaceful: PoolConfig,
    pub hostile: PoolConfig,
    /// Inner radius of the spawn ring; nothing spawns closer to the player
    pub min_spawn_distance: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            peaceful: PoolConfig {
                max_population: 8,
                spawn_radius: 80.0,
                spawn_interval: 30.0,
            },
            hostile: PoolConfig {
                max_population: 5,
                spawn_radius: 50.0,
                spawn_interval: 15.0,
            },
            min_spawn_distance: 30.0,
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_spawn_distance.is_nan() || self.min_spawn_distance < 0.0 {
            return Err(ConfigError::InvalidSpawner(
                "min_spawn_distance must be non-negative".to_string(),
            ));
        }
        for (label, pool) in [("peaceful", &self.peaceful), ("hostile", &self.hostile)] {
            if pool.spawn_interval.is_nan() || pool.spawn_interval <= 0.0 {
                return Err(ConfigError::InvalidSpawner(format!(
                    "{label} spawn_interval must be positive"
                )));
            }
            if pool.spawn_radius.is_nan() || pool.spawn_radius <= self.min_spawn_distance {
                return Err(ConfigError::InvalidSpawner(format!(
                    "{label} spawn_radius ({}) must exceed min_spawn_distance ({})",
                    pool.spawn_radius, self.min_spawn_distance
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Pool {
    config: PoolConfig,
    archetypes: Vec<Arc<CreatureProfile>>,
    members: Vec<EntityId>,
    /// Counts down to the next spawn attempt; starts expired
    timer: f32,
}

impl Pool {
    fn new(config: PoolConfig, archetypes: Vec<Arc<CreatureProfile>>) -> Self {
        Self {
            config,
            archetypes,
            members: Vec::new(),
            timer: 0.0,
        }
    }

    fn prune(&mut self, creatures: &CreatureMap) {
        self.members
            .retain(|id| creatures.get(id).is_some_and(Creature::is_alive));
    }

    fn has_room(&self) -> bool {
        self.members.len() < self.config.max_population
    }
}

/// Population manager for both creature classes
#[derive(Debug, Clone)]
pub struct Spawner {
    peaceful: Pool,
    hostile: Pool,
    min_spawn_distance: f32,
}

impl Spawner {
    pub fn new(
        config: &SpawnerConfig,
        wildlife: Vec<Arc<CreatureProfile>>,
        shadows: Vec<Arc<CreatureProfile>>,
    ) -> Self {
        if wildlife.is_empty() {
            log::warn!("No wildlife archetypes configured; peaceful spawning disabled");
        }
        if shadows.is_empty() {
            log::warn!("No shadow archetypes configured; hostile spawning disabled");
        }
        Self {
            peaceful: Pool::new(config.peaceful.clone(), wildlife),
            hostile: Pool::new(config.hostile.clone(), shadows),
            min_spawn_distance: config.min_spawn_distance,
        }
    }

    pub fn active_peaceful_count(&self) -> usize {
        self.peaceful.members.len()
    }

    pub fn active_hostile_count(&self) -> usize {
        self.hostile.members.len()
    }

    pub fn peaceful_timer(&self) -> f32 {
        self.peaceful.timer
    }

    pub fn hostile_timer(&self) -> f32 {
        self.hostile.timer
    }

    /// Run one spawner tick. Returns the ids spawned this tick.
    pub fn tick(
        &mut self,
        delta_time: f32,
        env: &mut Environment<'_>,
        rng: &mut SimRng,
        creatures: &mut CreatureMap,
    ) -> Vec<EntityId> {
        let Some(player) = env.player_position() else {
            return Vec::new();
        };

        self.peaceful.prune(creatures);
        self.hostile.prune(creatures);

        let mut spawned = Vec::new();
        let min_distance = self.min_spawn_distance;

        self.peaceful.timer -= delta_time;
        if self.peaceful.timer <= 0.0 && self.peaceful.has_room() {
            spawned.extend(spawn_into(
                &mut self.peaceful,
                min_distance,
                player,
                env.nav,
                rng,
                creatures,
            ));
            self.peaceful.timer = self.peaceful.config.spawn_interval;
        }

        if env.day_night.is_night() {
            self.hostile.timer -= delta_time;
            if self.hostile.timer <= 0.0 && self.hostile.has_room() {
                spawned.extend(spawn_into(
                    &mut self.hostile,
                    min_distance,
                    player,
                    env.nav,
                    rng,
                    creatures,
                ));
                self.hostile.timer = self.hostile.config.spawn_interval;
            }
        }

        spawned
    }

    /// Drop a dead creature from its pool
    pub fn on_creature_death(&mut self, notice: &DeathNotice) {
        let pool = match notice.class {
            PopulationClass::Peaceful => &mut self.peaceful,
            PopulationClass::Hostile => &mut self.hostile,
        };
        pool.members.retain(|id| *id != notice.id);
    }
}

/// Sample a walkable point in the ring between `min_distance` and `radius`
/// around `center`
fn find_spawn_point(
    nav: &dyn Navigation,
    rng: &mut SimRng,
    center: Vec3,
    min_distance: f32,
    radius: f32,
) -> Option<Vec3> {
    for _ in 0..SPAWN_POINT_ATTEMPTS {
        let offset = random_in_ring(rng, min_distance, radius);
        let candidate = center + Vec3::new(offset.x, 0.0, offset.y);
        if let Some(point) = nav.sample_position(candidate, SPAWN_SNAP_DISTANCE) {
            return Some(point);
        }
    }
    None
}

/// One spawn attempt for `pool`. Failures are silent.
fn spawn_into(
    pool: &mut Pool,
    min_distance: f32,
    player: Vec3,
    nav: &mut dyn Navigation,
    rng: &mut SimRng,
    creatures: &mut CreatureMap,
) -> Option<EntityId> {
    let profile = Arc::clone(pool.archetypes.choose(rng)?);
    let Some(point) = find_spawn_point(nav, rng, player, min_distance, pool.config.spawn_radius)
    else {
        log::trace!("No spawn point found for {}", profile.name);
        return None;
    };

    let yaw = rng.random_range(0.0..TAU);
    let mut creature = Creature::new(profile, point, yaw);
    creature.activate(nav, rng);
    let id = creature.id();

    pool.members.push(id);
    log::info!(
        "Spawned {} {} at ({:.1}, {:.1}, {:.1}). Population: {}/{}",
        creature.name(),
        id,
        point.x,
        point.y,
        point.z,
        pool.members.len(),
        pool.config.max_population
    );
    creatures.insert(id, creature);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_shipped_game() {
        let config = SpawnerConfig::default();
        assert_eq!(config.peaceful.max_population, 8);
        assert_eq!(config.hostile.max_population, 5);
        assert_eq!(config.peaceful.spawn_interval, 30.0);
        assert_eq!(config.hostile.spawn_interval, 15.0);
        assert_eq!(config.min_spawn_distance, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_ring() {
        let mut config = SpawnerConfig::default();
        config.hostile.spawn_radius = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpawner(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = SpawnerConfig::default();
        config.peaceful.spawn_interval = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_distances() {
        let mut config = SpawnerConfig::default();
        config.hostile.spawn_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SpawnerConfig::default();
        config.min_spawn_distance = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_new_spawner_is_empty_and_ready() {
        let spawner = Spawner::new(
            &SpawnerConfig::default(),
            vec![Arc::new(CreatureProfile::deer())],
            Vec::new(),
        );
        assert_eq!(spawner.active_peaceful_count(), 0);
        assert_eq!(spawner.active_hostile_count(), 0);
        assert_eq!(spawner.peaceful_timer(), 0.0);
    }
}
