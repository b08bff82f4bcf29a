//! Navigation service seam
//!
//! Pathfinding itself lives behind [`Navigation`]; creature and spawner code
//! only sample walkable points and steer agents. Point sampling is a normal,
//! frequent failure case, so every helper here returns `Option`.

pub mod open_field;

pub use open_field::{BlockedZone, OpenFieldNav};

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::entity::EntityId;

/// Attempts made by [`try_find_point`] before giving up
pub const FIND_POINT_ATTEMPTS: usize = 5;

/// Search distance used when snapping a random candidate onto the walkable surface
pub const FIND_POINT_SNAP_DISTANCE: f32 = 2.0;

/// Pathfinding service that owns movement agents.
///
/// Agents are keyed by the creature's [`EntityId`]. Calls on unknown agents
/// are ignored.
pub trait Navigation {
    /// Nearest walkable point within `max_distance` of `near`, if any.
    /// Must not change observable state.
    fn sample_position(&self, near: Vec3, max_distance: f32) -> Option<Vec3>;

    fn add_agent(&mut self, agent: EntityId, position: Vec3, speed: f32);

    fn remove_agent(&mut self, agent: EntityId);

    /// Replace the agent's destination; the previous request is dropped
    fn set_destination(&mut self, agent: EntityId, destination: Vec3);

    fn set_speed(&mut self, agent: EntityId, speed: f32);

    /// Halt the agent in place, keeping its destination
    fn stop(&mut self, agent: EntityId);

    /// Undo [`Navigation::stop`]
    fn resume(&mut self, agent: EntityId);

    /// True while a path request is still being computed
    fn is_path_pending(&self, _agent: EntityId) -> bool {
        false
    }

    /// Distance left to the current destination (0 without one)
    fn remaining_distance(&self, agent: EntityId) -> f32;

    fn agent_position(&self, agent: EntityId) -> Option<Vec3>;

    /// Move every agent along its path by `delta_time` seconds
    fn advance(&mut self, delta_time: f32);
}

/// Sample a random walkable point within `radius` of `center` on the horizontal plane.
///
/// Up to [`FIND_POINT_ATTEMPTS`] candidates are tried; the first one the
/// navigation service can snap wins.
pub fn try_find_point<R: Rng>(
    nav: &dyn Navigation,
    rng: &mut R,
    center: Vec3,
    radius: f32,
) -> Option<Vec3> {
    for _ in 0..FIND_POINT_ATTEMPTS {
        let offset = random_in_disc(rng, radius);
        let candidate = center + Vec3::new(offset.x, 0.0, offset.y);
        if let Some(point) = nav.sample_position(candidate, FIND_POINT_SNAP_DISTANCE) {
            return Some(point);
        }
    }

    log::trace!(
        "No walkable point within {:.1} of ({:.1}, {:.1}, {:.1})",
        radius,
        center.x,
        center.y,
        center.z
    );
    None
}

/// True once the agent has no pending path and is closer than `threshold` to its goal
pub fn has_arrived(nav: &dyn Navigation, agent: EntityId, threshold: f32) -> bool {
    !nav.is_path_pending(agent) && nav.remaining_distance(agent) < threshold
}

/// Uniform random point inside a disc of `radius`
pub fn random_in_disc<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = radius.max(0.0) * rng.random::<f32>().sqrt();
    Vec2::from_angle(angle) * distance
}

/// Random point in the ring between `inner` and `outer`, distance picked uniformly
pub fn random_in_ring<R: Rng>(rng: &mut R, inner: f32, outer: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = if outer > inner {
        rng.random_range(inner..outer)
    } else {
        inner
    };
    Vec2::from_angle(angle) * distance
}
