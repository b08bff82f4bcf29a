//! Creature instance
//!
//! Shared skeleton for both behavior variants: health, damage intake, the
//! death sequence and loot. Per-state decisions live in the brains.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use glam::Vec3;
use rand::Rng;

use super::context::{CreatureContext, DeathNotice};
use super::profile::{CreatureKind, CreatureProfile, PopulationClass};
use super::shadow::ShadowBrain;
use super::wildlife::WildlifeBrain;
use crate::entity::{EntityId, Health};
use crate::navigation::{try_find_point, Navigation};
use crate::SimRng;

/// Seconds from death until the creature is removed from the world
pub const DESPAWN_DELAY: f32 = 4.0;
/// Seconds spent tipping over before sinking
pub const TIP_OVER_DURATION: f32 = 1.0;
/// Tip-over rotation speed (90 degrees per second)
pub const TIP_OVER_RATE: f32 = FRAC_PI_2;
/// Sink speed once tipped over (units per second)
pub const SINK_SPEED: f32 = 0.5;
/// Loot appears this far above the body
pub const LOOT_DROP_HEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureState {
    Idle,
    Patrol,
    Flee,
    Chase,
    Attack,
    Dead,
}

/// State shared by both brains
#[derive(Debug, Clone)]
pub struct CreatureBody {
    pub id: EntityId,
    pub profile: Arc<CreatureProfile>,
    pub state: CreatureState,
    pub health: Health,
    pub position: Vec3,
    /// Heading around the vertical axis, radians (0 faces +Z)
    pub yaw: f32,
    pub spawn_origin: Vec3,
}

impl CreatureBody {
    pub(crate) fn set_state(&mut self, next: CreatureState) {
        if self.state != next {
            log::debug!("{} {}: {:?} -> {:?}", self.profile.name, self.id, self.state, next);
            self.state = next;
        }
    }

    pub(crate) fn distance_to(&self, target: Option<Vec3>) -> f32 {
        target.map_or(f32::INFINITY, |t| self.position.distance(t))
    }

    pub(crate) fn run(&self, nav: &mut dyn Navigation) {
        nav.set_speed(self.id, self.profile.run_speed);
    }

    pub(crate) fn walk(&self, nav: &mut dyn Navigation) {
        nav.set_speed(self.id, self.profile.move_speed);
    }

    /// Turn to face `target` on the horizontal plane
    pub(crate) fn face(&mut self, target: Vec3) {
        let mut look = target - self.position;
        look.y = 0.0;
        if look.length_squared() > 0.001 {
            self.yaw = look.x.atan2(look.z);
        }
    }

    /// Send the agent to a random walkable point around the spawn origin.
    /// Keeps the current destination if no point is found.
    pub(crate) fn pick_patrol_target(&self, nav: &mut dyn Navigation, rng: &mut SimRng) {
        let radius = self.profile.kind.patrol_radius();
        if let Some(point) = try_find_point(nav, rng, self.spawn_origin, radius) {
            nav.set_destination(self.id, point);
        }
    }
}

/// Behavior variant, picked from the profile's kind at creation
#[derive(Debug, Clone)]
pub enum Brain {
    Wildlife(WildlifeBrain),
    Shadow(ShadowBrain),
}

impl Brain {
    fn for_kind(kind: &CreatureKind) -> Self {
        match *kind {
            CreatureKind::Wildlife { idle_duration, .. } => {
                Brain::Wildlife(WildlifeBrain::new(idle_duration))
            }
            CreatureKind::Shadow {
                sunlight_damage, ..
            } => Brain::Shadow(ShadowBrain::new(sunlight_damage)),
        }
    }
}

/// Cosmetic tip-over-and-sink animation. Never delays removal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathSequence {
    elapsed: f32,
    tilt_axis: Vec3,
    tilt_angle: f32,
}

impl DeathSequence {
    fn new(tilt_axis: Vec3) -> Self {
        Self {
            elapsed: 0.0,
            tilt_axis,
            tilt_angle: 0.0,
        }
    }

    fn advance(&mut self, delta_time: f32, position: &mut Vec3) {
        if self.elapsed < TIP_OVER_DURATION {
            self.tilt_angle = (self.tilt_angle + TIP_OVER_RATE * delta_time).min(FRAC_PI_2);
        } else {
            position.y -= SINK_SPEED * delta_time;
        }
        self.elapsed += delta_time;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Horizontal axis the body rotates around
    pub fn tilt_axis(&self) -> Vec3 {
        self.tilt_axis
    }

    pub fn tilt_angle(&self) -> f32 {
        self.tilt_angle
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= DESPAWN_DELAY
    }
}

/// One live creature
#[derive(Debug, Clone)]
pub struct Creature {
    body: CreatureBody,
    brain: Brain,
    death: Option<DeathSequence>,
}

impl Creature {
    /// Create a creature standing at `position`. Call [`Creature::activate`]
    /// before its first update.
    pub fn new(profile: Arc<CreatureProfile>, position: Vec3, yaw: f32) -> Self {
        let brain = Brain::for_kind(&profile.kind);
        Self {
            body: CreatureBody {
                id: EntityId::new(),
                health: Health::new(profile.max_health),
                profile,
                state: CreatureState::Patrol,
                position,
                yaw,
                spawn_origin: position,
            },
            brain,
            death: None,
        }
    }

    /// Register the navigation agent and pick the first patrol target
    pub fn activate(&mut self, nav: &mut dyn Navigation, rng: &mut SimRng) {
        nav.add_agent(self.body.id, self.body.position, self.body.profile.move_speed);
        self.body.pick_patrol_target(nav, rng);
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    pub fn name(&self) -> &str {
        &self.body.profile.name
    }

    pub fn profile(&self) -> &Arc<CreatureProfile> {
        &self.body.profile
    }

    pub fn class(&self) -> PopulationClass {
        self.body.profile.class()
    }

    pub fn state(&self) -> CreatureState {
        self.body.state
    }

    pub fn health(&self) -> f32 {
        self.body.health.current()
    }

    pub fn max_health(&self) -> f32 {
        self.body.health.max()
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn yaw(&self) -> f32 {
        self.body.yaw
    }

    pub fn spawn_origin(&self) -> Vec3 {
        self.body.spawn_origin
    }

    pub fn is_alive(&self) -> bool {
        self.body.state != CreatureState::Dead
    }

    pub fn death_sequence(&self) -> Option<&DeathSequence> {
        self.death.as_ref()
    }

    /// True once the despawn delay after death has elapsed
    pub fn is_ready_for_removal(&self) -> bool {
        self.death.as_ref().is_some_and(DeathSequence::is_finished)
    }

    /// Pull the agent's position after navigation moved it
    pub fn sync_position(&mut self, nav: &dyn Navigation) {
        if !self.is_alive() {
            return;
        }
        if let Some(position) = nav.agent_position(self.body.id) {
            self.body.position = position;
        }
    }

    /// Run one behavior tick
    pub fn update(&mut self, delta_time: f32, ctx: &mut CreatureContext<'_, '_>) {
        if let Some(death) = &mut self.death {
            death.advance(delta_time, &mut self.body.position);
            return;
        }

        let distance = self.body.distance_to(ctx.player_position());
        let died = match &mut self.brain {
            Brain::Wildlife(brain) => {
                brain.update(&mut self.body, distance, delta_time, ctx);
                false
            }
            Brain::Shadow(brain) => brain.update(&mut self.body, distance, delta_time, ctx),
        };

        if died {
            self.die(ctx);
        }
    }

    /// Apply incoming damage. No-op once dead or for non-positive amounts.
    pub fn take_damage(&mut self, amount: f32, ctx: &mut CreatureContext<'_, '_>) {
        if !self.is_alive() || amount.is_nan() || amount <= 0.0 {
            return;
        }

        if self.body.health.take_damage(amount) {
            self.die(ctx);
            return;
        }

        match &mut self.brain {
            Brain::Wildlife(brain) => brain.on_damaged(&mut self.body, ctx),
            Brain::Shadow(brain) => brain.on_damaged(&mut self.body, ctx),
        }
    }

    fn die(&mut self, ctx: &mut CreatureContext<'_, '_>) {
        if !self.is_alive() {
            return;
        }

        self.body.set_state(CreatureState::Dead);
        ctx.env.nav.remove_agent(self.body.id);

        let angle = ctx.rng.random_range(0.0..TAU);
        self.death = Some(DeathSequence::new(Vec3::new(angle.cos(), 0.0, angle.sin())));

        let drop_at = self.body.position + Vec3::Y * LOOT_DROP_HEIGHT;
        for (item, quantity) in self.body.profile.roll_loot(ctx.rng) {
            ctx.env.loot.deposit(item, quantity, drop_at);
        }

        log::info!(
            "{} {} died at ({:.1}, {:.1}, {:.1})",
            self.body.profile.name,
            self.body.id,
            self.body.position.x,
            self.body.position.y,
            self.body.position.z
        );

        ctx.deaths.push(DeathNotice {
            id: self.body.id,
            name: self.body.profile.name.clone(),
            class: self.class(),
            position: self.body.position,
        });
    }
}
