//! Peaceful wildlife behavior
//!
//! Grazes around its spawn point, alternating between standing idle and
//! walking to random points. Runs from the player and never fights back.

use glam::Vec3;
use rand::Rng;

use super::context::CreatureContext;
use super::creature::{CreatureBody, CreatureState};
use crate::navigation::has_arrived;

/// How far ahead of the creature a flee destination is requested
pub const FLEE_DISTANCE: f32 = 10.0;
/// Search distance used when snapping a flee destination
pub const FLEE_SNAP_DISTANCE: f32 = 5.0;
/// Remaining distance under which a patrol leg counts as finished
pub const ARRIVAL_THRESHOLD: f32 = 1.0;
/// Idle duration varies by up to this much either way
pub const IDLE_JITTER: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct WildlifeBrain {
    idle_duration: f32,
    idle_timer: f32,
}

impl WildlifeBrain {
    pub fn new(idle_duration: f32) -> Self {
        Self {
            idle_duration,
            idle_timer: idle_duration,
        }
    }

    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    pub(crate) fn update(
        &mut self,
        body: &mut CreatureBody,
        distance: f32,
        delta_time: f32,
        ctx: &mut CreatureContext<'_, '_>,
    ) {
        let detected = distance < body.profile.detection_range;

        match body.state {
            CreatureState::Idle => {
                self.idle_timer -= delta_time;
                if self.idle_timer <= 0.0 {
                    body.set_state(CreatureState::Patrol);
                    body.pick_patrol_target(ctx.env.nav, ctx.rng);
                }
                if detected {
                    start_fleeing(body, ctx);
                }
            }
            CreatureState::Patrol => {
                if has_arrived(ctx.env.nav, body.id, ARRIVAL_THRESHOLD) {
                    body.set_state(CreatureState::Idle);
                    self.idle_timer =
                        self.idle_duration + ctx.rng.random_range(-IDLE_JITTER..=IDLE_JITTER);
                }
                if detected {
                    start_fleeing(body, ctx);
                }
            }
            CreatureState::Flee => {
                if let Some(player) = ctx.player_position() {
                    flee_from(body, player, ctx);
                }
                if distance > body.profile.flee_range {
                    body.set_state(CreatureState::Patrol);
                    body.walk(ctx.env.nav);
                    body.pick_patrol_target(ctx.env.nav, ctx.rng);
                }
            }
            CreatureState::Chase | CreatureState::Attack | CreatureState::Dead => {}
        }
    }

    pub(crate) fn on_damaged(&mut self, body: &mut CreatureBody, ctx: &mut CreatureContext<'_, '_>) {
        if body.state != CreatureState::Flee {
            start_fleeing(body, ctx);
        }
    }
}

fn start_fleeing(body: &mut CreatureBody, ctx: &mut CreatureContext<'_, '_>) {
    body.set_state(CreatureState::Flee);
    body.run(ctx.env.nav);
}

/// Steer away from `player` on the horizontal plane.
///
/// Tries the full flee distance, then half of it. Keeps the previous
/// destination when neither point is walkable.
fn flee_from(body: &mut CreatureBody, player: Vec3, ctx: &mut CreatureContext<'_, '_>) {
    let mut away = body.position - player;
    away.y = 0.0;
    let direction = away.try_normalize().unwrap_or_else(|| facing(body.yaw));

    for distance in [FLEE_DISTANCE, FLEE_DISTANCE * 0.5] {
        let target = body.position + direction * distance;
        if let Some(point) = ctx.env.nav.sample_position(target, FLEE_SNAP_DISTANCE) {
            ctx.env.nav.set_destination(body.id, point);
            return;
        }
    }
    log::trace!("{} {} found nowhere to flee", body.profile.name, body.id);
}

fn facing(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::context::Environment;
    use crate::creature::CreatureProfile;
    use crate::entity::{EntityId, GroundLoot, Health};
    use crate::navigation::{Navigation, OpenFieldNav};
    use crate::world::DayNightCycle;
    use crate::SimRng;
    use glam::Vec2;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn body_at(position: Vec3) -> CreatureBody {
        let profile = Arc::new(CreatureProfile::deer());
        CreatureBody {
            id: EntityId::new(),
            health: Health::new(profile.max_health),
            profile,
            state: CreatureState::Flee,
            position,
            yaw: 0.0,
            spawn_origin: position,
        }
    }

    #[test]
    fn test_flee_falls_back_to_half_distance_near_the_edge() {
        let mut nav = OpenFieldNav::new(Vec2::splat(-100.0), Vec2::splat(100.0));
        let sky = DayNightCycle::at(0.5);
        let mut loot = GroundLoot::new();
        let mut rng = SimRng::seed_from_u64(1);
        let mut deaths = Vec::new();

        // Full distance lands 7 units past the edge, half distance only 2
        let mut body = body_at(Vec3::new(-97.0, 0.0, 0.0));
        nav.add_agent(body.id, body.position, 7.0);

        let mut env = Environment {
            nav: &mut nav,
            player: None,
            day_night: &sky,
            loot: &mut loot,
        };
        let mut ctx = CreatureContext {
            env: &mut env,
            rng: &mut rng,
            deaths: &mut deaths,
        };
        flee_from(&mut body, Vec3::new(-90.0, 0.0, 0.0), &mut ctx);

        assert_eq!(nav.destination(body.id), Some(Vec3::new(-100.0, 0.0, 0.0)));
    }

    #[test]
    fn test_flee_from_player_on_top_uses_facing() {
        let mut nav = OpenFieldNav::new(Vec2::splat(-100.0), Vec2::splat(100.0));
        let sky = DayNightCycle::at(0.5);
        let mut loot = GroundLoot::new();
        let mut rng = SimRng::seed_from_u64(1);
        let mut deaths = Vec::new();

        let mut body = body_at(Vec3::ZERO);
        nav.add_agent(body.id, body.position, 7.0);

        let mut env = Environment {
            nav: &mut nav,
            player: None,
            day_night: &sky,
            loot: &mut loot,
        };
        let mut ctx = CreatureContext {
            env: &mut env,
            rng: &mut rng,
            deaths: &mut deaths,
        };
        flee_from(&mut body, Vec3::new(0.0, 1.8, 0.0), &mut ctx);

        assert_eq!(nav.destination(body.id), Some(Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_facing_matches_yaw_convention() {
        assert!((facing(0.0) - Vec3::Z).length() < 1e-5);
        assert!((facing(std::f32::consts::FRAC_PI_2) - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_new_brain_starts_with_full_idle_timer() {
        assert_eq!(WildlifeBrain::new(3.0).idle_timer(), 3.0);
    }
}
