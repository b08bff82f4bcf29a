//! World - owns every creature and drives the per-tick update

use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;

use crate::config::SimulationConfig;
use crate::creature::{
    Creature, CreatureContext, CreatureMap, CreatureProfile, DeathListeners, DeathNotice,
    Environment, ListenerId, PopulationClass, Spawner,
};
use crate::entity::EntityId;
use crate::SimRng;

/// What changed during one [`World::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    pub spawned: Vec<EntityId>,
    pub deaths: Vec<DeathNotice>,
    pub removed: Vec<EntityId>,
}

pub struct World {
    creatures: CreatureMap,
    spawner: Spawner,
    listeners: DeathListeners,
    rng: SimRng,
    elapsed: f32,
}

impl World {
    pub fn new(spawner: Spawner, seed: u64) -> Self {
        Self {
            creatures: CreatureMap::new(),
            spawner,
            listeners: DeathListeners::new(),
            rng: SimRng::seed_from_u64(seed),
            elapsed: 0.0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let spawner = Spawner::new(
            &config.spawner,
            config.wildlife_archetypes(),
            config.shadow_archetypes(),
        );
        Self::new(spawner, config.seed)
    }

    /// Advance the simulation by `delta_time` seconds.
    ///
    /// Order: creature behavior, navigation movement, death dispatch,
    /// removal of expired bodies, then the spawner.
    pub fn tick(&mut self, delta_time: f32, env: &mut Environment<'_>) -> TickSummary {
        let mut deaths = Vec::new();
        {
            let mut ctx = CreatureContext {
                env: &mut *env,
                rng: &mut self.rng,
                deaths: &mut deaths,
            };
            for creature in self.creatures.values_mut() {
                creature.update(delta_time, &mut ctx);
            }
        }

        env.nav.advance(delta_time);
        for creature in self.creatures.values_mut() {
            creature.sync_position(&*env.nav);
        }

        self.dispatch_deaths(&deaths);
        let removed = self.remove_expired();
        let spawned = self
            .spawner
            .tick(delta_time, env, &mut self.rng, &mut self.creatures);

        self.elapsed += delta_time;

        TickSummary {
            spawned,
            deaths,
            removed,
        }
    }

    /// Place a creature directly, outside population control
    pub fn spawn(
        &mut self,
        profile: Arc<CreatureProfile>,
        position: Vec3,
        yaw: f32,
        env: &mut Environment<'_>,
    ) -> EntityId {
        let mut creature = Creature::new(profile, position, yaw);
        creature.activate(env.nav, &mut self.rng);
        let id = creature.id();
        log::info!("Placed {} {}", creature.name(), id);
        self.creatures.insert(id, creature);
        id
    }

    /// Damage one creature. Returns false if it doesn't exist or is already dead.
    pub fn damage_creature(
        &mut self,
        id: EntityId,
        amount: f32,
        env: &mut Environment<'_>,
    ) -> bool {
        let Some(creature) = self.creatures.get_mut(&id) else {
            return false;
        };
        if !creature.is_alive() {
            return false;
        }

        let mut deaths = Vec::new();
        let mut ctx = CreatureContext {
            env,
            rng: &mut self.rng,
            deaths: &mut deaths,
        };
        creature.take_damage(amount, &mut ctx);
        self.dispatch_deaths(&deaths);
        true
    }

    pub fn subscribe_deaths(&mut self, callback: impl FnMut(&DeathNotice) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe_deaths(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    /// Living and dying creatures still in the world
    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Seconds simulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Closest living creature to `position`
    pub fn nearest_creature(&self, position: Vec3) -> Option<&Creature> {
        self.living()
            .min_by(|a, b| {
                a.position()
                    .distance_squared(position)
                    .total_cmp(&b.position().distance_squared(position))
            })
    }

    /// Number of living hostile creatures within `radius` of `position`
    pub fn hostiles_within(&self, position: Vec3, radius: f32) -> usize {
        self.living()
            .filter(|c| c.class() == PopulationClass::Hostile)
            .filter(|c| c.position().distance(position) <= radius)
            .count()
    }

    /// Closest living creature within `radius` of `position`
    pub fn creature_at(&self, position: Vec3, radius: f32) -> Option<EntityId> {
        self.nearest_creature(position)
            .filter(|c| c.position().distance(position) <= radius)
            .map(Creature::id)
    }

    fn living(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values().filter(|c| c.is_alive())
    }

    fn dispatch_deaths(&mut self, deaths: &[DeathNotice]) {
        for notice in deaths {
            self.spawner.on_creature_death(notice);
            self.listeners.notify(notice);
        }
    }

    fn remove_expired(&mut self) -> Vec<EntityId> {
        let expired: Vec<EntityId> = self
            .creatures
            .values()
            .filter(|c| c.is_ready_for_removal())
            .map(Creature::id)
            .collect();

        for id in &expired {
            if let Some(creature) = self.creatures.remove(id) {
                log::info!(
                    "Removed {} {}. Creatures: {}",
                    creature.name(),
                    id,
                    self.creatures.len()
                );
            }
        }
        expired
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("creatures", &self.creatures.len())
            .field("peaceful", &self.spawner.active_peaceful_count())
            .field("hostile", &self.spawner.active_hostile_count())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}
