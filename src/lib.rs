//! # Shadowfall - creature behavior and population control
//!
//! Wildlife that grazes and flees, shadow creatures that hunt at night and
//! burn at sunrise, and a spawner that keeps both populations near the player.

pub mod config;
pub mod creature;
pub mod entity;
pub mod navigation;
pub mod world;

/// Random number generator used for every simulation decision
pub type SimRng = rand_xoshiro::Xoshiro256StarStar;

/// Common imports for internal use
pub mod prelude {
    pub use crate::config::{ArenaConfig, ConfigError, SimulationConfig};
    pub use crate::creature::{
        Creature, CreatureProfile, CreatureState, DeathNotice, Environment, PopulationClass,
        Spawner, SpawnerConfig,
    };
    pub use crate::entity::{EntityId, GroundLoot, Player};
    pub use crate::navigation::{Navigation, OpenFieldNav};
    pub use crate::world::{DayNight, DayNightCycle, World};
    pub use glam::Vec3;
}
