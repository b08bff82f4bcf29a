use glam::Vec3;

use super::{health::Health, inventory::Inventory};

/// What creatures need from the player: where it stands and a way to hurt it
pub trait PlayerTarget {
    fn position(&self) -> Vec3;

    fn apply_damage(&mut self, amount: f32);
}

/// Minimal player used by the headless driver
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub health: Health,
    pub inventory: Inventory,
    /// Seconds until the next melee swing is allowed
    attack_cooldown: f32,
}

impl Player {
    pub const ATTACK_DAMAGE: f32 = 25.0;
    pub const ATTACK_REACH: f32 = 3.0;
    pub const ATTACK_COOLDOWN: f32 = 0.5;

    pub fn new(position: Vec3) -> Self {
        Player {
            position,
            health: Health::new(100.0),
            inventory: Inventory::default(),
            attack_cooldown: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }

    /// Tick the swing cooldown. Returns true when a swing is ready and consumes it.
    pub fn try_swing(&mut self, delta_time: f32) -> bool {
        self.attack_cooldown -= delta_time;
        if self.attack_cooldown > 0.0 || self.is_dead() {
            return false;
        }
        self.attack_cooldown = Self::ATTACK_COOLDOWN;
        true
    }

    /// Returns true only for the hit that kills the player
    pub fn take_hit(&mut self, amount: f32) -> bool {
        let was_alive = !self.is_dead();
        self.health.take_damage(amount) && was_alive
    }
}

impl PlayerTarget for Player {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_damage(&mut self, amount: f32) {
        if self.take_hit(amount) {
            log::info!("Player was killed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_takes_damage() {
        let mut player = Player::new(Vec3::ZERO);
        player.apply_damage(30.0);
        assert_eq!(player.health.current(), 70.0);
        player.apply_damage(500.0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_only_the_killing_hit_counts_as_a_kill() {
        let mut player = Player::new(Vec3::ZERO);
        assert!(!player.take_hit(60.0));
        assert!(player.take_hit(60.0));
        assert!(!player.take_hit(10.0));
        assert!(!player.take_hit(10.0));
        assert!(player.is_dead());
    }

    #[test]
    fn test_swing_cooldown() {
        let mut player = Player::new(Vec3::ZERO);
        assert!(player.try_swing(0.1));
        assert!(!player.try_swing(0.1));
        assert!(!player.try_swing(0.3));
        assert!(player.try_swing(0.2));
    }
}
