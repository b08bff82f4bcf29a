//! Flat, open-field navigation
//!
//! A rectangular walkable plane with circular blocked zones (ponds, boulders).
//! Agents walk in straight lines on the plane. Good enough for the headless
//! driver and for tests that need real movement.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::Navigation;
use crate::entity::EntityId;

/// Circular area agents may not stand in, in plane (x, z) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockedZone {
    pub center: Vec2,
    pub radius: f32,
}

impl BlockedZone {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }
}

#[derive(Debug, Clone)]
struct Agent {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    stopped: bool,
}

/// Open-field [`Navigation`] implementation
#[derive(Debug, Clone)]
pub struct OpenFieldNav {
    min: Vec2,
    max: Vec2,
    ground_height: f32,
    blocked: Vec<BlockedZone>,
    stopping_distance: f32,
    agents: BTreeMap<EntityId, Agent>,
}

impl OpenFieldNav {
    pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.5;

    /// Walkable rectangle spanning `min..=max` on the (x, z) plane at height 0
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            ground_height: 0.0,
            blocked: Vec::new(),
            stopping_distance: Self::DEFAULT_STOPPING_DISTANCE,
            agents: BTreeMap::new(),
        }
    }

    pub fn with_ground_height(mut self, height: f32) -> Self {
        self.ground_height = height;
        self
    }

    pub fn with_blocked_zone(mut self, zone: BlockedZone) -> Self {
        self.blocked.push(zone);
        self
    }

    pub fn with_stopping_distance(mut self, distance: f32) -> Self {
        self.stopping_distance = distance.max(0.0);
        self
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn destination(&self, agent: EntityId) -> Option<Vec3> {
        self.agents.get(&agent).and_then(|a| a.destination)
    }

    fn in_bounds(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    fn is_walkable(&self, point: Vec2) -> bool {
        self.in_bounds(point) && !self.blocked.iter().any(|zone| zone.contains(point))
    }
}

fn plane(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

impl Navigation for OpenFieldNav {
    fn sample_position(&self, near: Vec3, max_distance: f32) -> Option<Vec3> {
        let mut point = plane(near).clamp(self.min, self.max);

        if let Some(zone) = self.blocked.iter().find(|zone| zone.contains(point)) {
            let away = (point - zone.center).normalize_or_zero();
            let away = if away == Vec2::ZERO { Vec2::X } else { away };
            point = zone.center + away * (zone.radius + 0.01);
        }

        if !self.is_walkable(point) {
            return None;
        }

        let snapped = Vec3::new(point.x, self.ground_height, point.y);
        (snapped.distance(near) <= max_distance).then_some(snapped)
    }

    fn add_agent(&mut self, agent: EntityId, position: Vec3, speed: f32) {
        self.agents.insert(
            agent,
            Agent {
                position,
                destination: None,
                speed,
                stopped: false,
            },
        );
    }

    fn remove_agent(&mut self, agent: EntityId) {
        self.agents.remove(&agent);
    }

    fn set_destination(&mut self, agent: EntityId, destination: Vec3) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.destination = Some(destination);
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
        self.agents
            .get(&agent)
            .and_then(|a| a.destination.map(|d| plane(d).distance(plane(a.position))))
            .unwrap_or(0.0)
    }

    fn agent_position(&self, agent: EntityId) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn advance(&mut self, delta_time: f32) {
        for agent in self.agents.values_mut() {
            if agent.stopped {
                continue;
            }
            let Some(destination) = agent.destination else {
                continue;
            };

            let to_target = plane(destination) - plane(agent.position);
            let distance = to_target.length();
            if distance <= self.stopping_distance {
                continue;
            }

            let step = (agent.speed * delta_time).min(distance - self.stopping_distance);
            let moved = plane(agent.position) + to_target / distance * step;
            agent.position = Vec3::new(moved.x, self.ground_height, moved.y);
        }
    }
}
