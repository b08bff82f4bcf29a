//! Hostile shadow creature behavior
//!
//! Patrols until the player comes close, then chases and attacks on a fixed
//! cooldown. Daylight burns it until it dies.

use super::context::CreatureContext;
use super::creature::{CreatureBody, CreatureState};
use crate::navigation::has_arrived;

/// Remaining distance under which a patrol leg counts as finished
pub const ARRIVAL_THRESHOLD: f32 = 1.5;
/// Chase gives up beyond this multiple of the detection range,
/// attack gives up beyond this multiple of the attack range
pub const LEASH_FACTOR: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct ShadowBrain {
    sunlight_damage: f32,
    attack_timer: f32,
}

impl ShadowBrain {
    pub fn new(sunlight_damage: f32) -> Self {
        Self {
            sunlight_damage,
            attack_timer: 0.0,
        }
    }

    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    /// Returns true when daylight burned the creature to death this tick
    pub(crate) fn update(
        &mut self,
        body: &mut CreatureBody,
        distance: f32,
        delta_time: f32,
        ctx: &mut CreatureContext<'_, '_>,
    ) -> bool {
        if !ctx.is_night() {
            return body.health.drain(self.sunlight_damage, delta_time);
        }

        let detection_range = body.profile.detection_range;
        let attack_range = body.profile.attack_range;
        let damage = body.profile.damage;
        let cooldown = body.profile.attack_cooldown;

        match body.state {
            CreatureState::Patrol => {
                if has_arrived(ctx.env.nav, body.id, ARRIVAL_THRESHOLD) {
                    body.pick_patrol_target(ctx.env.nav, ctx.rng);
                }
                if distance < detection_range {
                    body.set_state(CreatureState::Chase);
                    body.run(ctx.env.nav);
                }
            }
            CreatureState::Chase => {
                if let Some(player) = ctx.player_position() {
                    ctx.env.nav.set_destination(body.id, player);
                }
                if distance <= attack_range {
                    body.set_state(CreatureState::Attack);
                    ctx.env.nav.stop(body.id);
                    self.attack_timer = 0.0;
                } else if distance > detection_range * LEASH_FACTOR {
                    body.set_state(CreatureState::Patrol);
                    body.walk(ctx.env.nav);
                    body.pick_patrol_target(ctx.env.nav, ctx.rng);
                }
            }
            CreatureState::Attack => {
                if let Some(player) = ctx.player_position() {
                    body.face(player);
                }

                // One hit per elapsed cooldown, even when a frame spans several
                self.attack_timer -= delta_time;
                while self.attack_timer <= 0.0 {
                    ctx.damage_player(damage);
                    log::debug!("{} {} hit the player for {}", body.profile.name, body.id, damage);
                    if cooldown.is_nan() || cooldown <= 0.0 {
                        self.attack_timer = 0.0;
                        break;
                    }
                    self.attack_timer += cooldown;
                }

                if distance > attack_range * LEASH_FACTOR {
                    body.set_state(CreatureState::Chase);
                    ctx.env.nav.resume(body.id);
                    body.run(ctx.env.nav);
                }
            }
            CreatureState::Idle | CreatureState::Flee | CreatureState::Dead => {}
        }

        false
    }

    pub(crate) fn on_damaged(&mut self, body: &mut CreatureBody, ctx: &mut CreatureContext<'_, '_>) {
        if body.state == CreatureState::Patrol {
            body.set_state(CreatureState::Chase);
            body.run(ctx.env.nav);
        }
    }
}
