//! Scripted collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec3;
use shadowfall::creature::{CreatureProfile, Environment, Spawner, SpawnerConfig};
use shadowfall::entity::{EntityId, GroundLoot, PlayerTarget};
use shadowfall::navigation::Navigation;
use shadowfall::world::{DayNightCycle, World};

#[derive(Debug, Clone, Default)]
pub struct AgentRecord {
    pub position: Vec3,
    pub destination: Option<Vec3>,
    pub speed: f32,
    pub stopped: bool,
    pub destinations_set: usize,
}

/// Navigation double. Agents only move when a test moves them; sampling
/// returns the query point on the ground unless switched off.
#[derive(Debug, Default)]
pub struct TestNav {
    pub agents: BTreeMap<EntityId, AgentRecord>,
    pub sampling_fails: bool,
    /// Report every agent as arrived regardless of distance
    pub always_arrived: bool,
    pub samples_taken: std::cell::Cell<usize>,
}

impl TestNav {
    pub fn agent(&self, id: EntityId) -> &AgentRecord {
        &self.agents[&id]
    }

    pub fn move_agent(&mut self, id: EntityId, position: Vec3) {
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.position = position;
        }
    }
}

impl Navigation for TestNav {
    fn sample_position(&self, near: Vec3, _max_distance: f32) -> Option<Vec3> {
        self.samples_taken.set(self.samples_taken.get() + 1);
        (!self.sampling_fails).then_some(Vec3::new(near.x, 0.0, near.z))
    }

    fn add_agent(&mut self, agent: EntityId, position: Vec3, speed: f32) {
        self.agents.insert(
            agent,
            AgentRecord {
                position,
                speed,
                ..AgentRecord::default()
            },
        );
    }

    fn remove_agent(&mut self, agent: EntityId) {
        self.agents.remove(&agent);
    }

    fn set_destination(&mut self, agent: EntityId, destination: Vec3) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.destination = Some(destination);
            a.destinations_set += 1;
        }
    }

    fn set_speed(&mut self, agent: EntityId, speed: f32) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.speed = speed;
        }
    }

    fn stop(&mut self, agent: EntityId) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.stopped = true;
        }
    }

    fn resume(&mut self, agent: EntityId) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.stopped = false;
        }
    }

    fn remaining_distance(&self, agent: EntityId) -> f32 {
        if self.always_arrived {
            return 0.0;
        }
        self.agents
            .get(&agent)
            .and_then(|a| a.destination.map(|d| d.distance(a.position)))
            .unwrap_or(0.0)
    }

    fn agent_position(&self, agent: EntityId) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn advance(&mut self, _delta_time: f32) {}
}

/// Player double that records every hit
#[derive(Debug, Default)]
pub struct TestPlayer {
    pub position: Vec3,
    pub hits: Vec<f32>,
}

impl PlayerTarget for TestPlayer {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_damage(&mut self, amount: f32) {
        self.hits.push(amount);
    }
}

/// Everything a world needs around it, with the player present by default
pub struct Harness {
    pub nav: TestNav,
    pub player: TestPlayer,
    pub player_present: bool,
    pub sky: DayNightCycle,
    pub loot: GroundLoot,
}

impl Harness {
    pub fn at_time(time_of_day: f32) -> Self {
        Self {
            nav: TestNav::default(),
            player: TestPlayer::default(),
            player_present: true,
            sky: DayNightCycle::at(time_of_day),
            loot: GroundLoot::new(),
        }
    }

    pub fn night() -> Self {
        Self::at_time(0.0)
    }

    pub fn day() -> Self {
        Self::at_time(0.5)
    }

    pub fn env(&mut self) -> Environment<'_> {
        let player: Option<&mut dyn PlayerTarget> = if self.player_present {
            Some(&mut self.player)
        } else {
            None
        };
        Environment {
            nav: &mut self.nav,
            player,
            day_night: &self.sky,
            loot: &mut self.loot,
        }
    }
}

/// World without population control, for placing creatures by hand
pub fn empty_world() -> World {
    World::new(
        Spawner::new(&SpawnerConfig::default(), Vec::new(), Vec::new()),
        11,
    )
}

pub fn place(
    world: &mut World,
    harness: &mut Harness,
    profile: CreatureProfile,
    position: Vec3,
) -> EntityId {
    world.spawn(Arc::new(profile), position, 0.0, &mut harness.env())
}
