//! Explicit per-tick context handed to creature behavior
//!
//! Nothing in the creature code looks anything up globally: the player,
//! sky, navigation and loot sink all arrive through [`Environment`].

use glam::Vec3;

use super::profile::PopulationClass;
use crate::entity::{EntityId, LootSink, PlayerTarget};
use crate::navigation::Navigation;
use crate::world::DayNight;
use crate::SimRng;

/// External collaborators for one world tick
pub struct Environment<'e> {
    pub nav: &'e mut dyn Navigation,
    /// `None` until the player exists; creatures then see it as infinitely far away
    pub player: Option<&'e mut dyn PlayerTarget>,
    pub day_night: &'e dyn DayNight,
    pub loot: &'e mut dyn LootSink,
}

impl Environment<'_> {
    pub fn player_position(&self) -> Option<Vec3> {
        self.player.as_ref().map(|player| player.position())
    }
}

/// Emitted exactly once when a creature dies
#[derive(Debug, Clone, PartialEq)]
pub struct DeathNotice {
    pub id: EntityId,
    pub name: String,
    pub class: PopulationClass,
    pub position: Vec3,
}

/// Everything a creature may touch while it updates
pub struct CreatureContext<'a, 'e> {
    pub env: &'a mut Environment<'e>,
    pub rng: &'a mut SimRng,
    /// Death notices raised this tick, dispatched by the world afterwards
    pub deaths: &'a mut Vec<DeathNotice>,
}

impl CreatureContext<'_, '_> {
    pub fn player_position(&self) -> Option<Vec3> {
        self.env.player_position()
    }

    pub fn is_night(&self) -> bool {
        self.env.day_night.is_night()
    }

    pub fn damage_player(&mut self, amount: f32) {
        if let Some(player) = self.env.player.as_deref_mut() {
            player.apply_damage(amount);
        }
    }
}
