//! Creature system - behavior state machines and population control
//!
//! This module implements:
//! - Shared creature archetypes ([`CreatureProfile`]) with loot tables
//! - Wildlife and shadow behavior variants behind one [`Creature`] type
//! - Death notices and listeners
//! - The [`Spawner`] that keeps both populations topped up

#![allow(clippy::module_inception)]

pub mod context;
pub mod creature;
pub mod events;
pub mod profile;
pub mod shadow;
pub mod spawning;
pub mod wildlife;

// Re-export main types for convenience
pub use context::{CreatureContext, DeathNotice, Environment};
pub use creature::{Brain, Creature, CreatureState, DeathSequence, DESPAWN_DELAY};
pub use events::{DeathListeners, ListenerId};
pub use profile::{CreatureKind, CreatureProfile, LootEntry, PopulationClass};
pub use spawning::{CreatureMap, PoolConfig, Spawner, SpawnerConfig};
