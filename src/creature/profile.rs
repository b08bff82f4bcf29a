//! Creature archetypes
//!
//! A [`CreatureProfile`] is loaded once and shared (`Arc`) by every creature
//! spawned from it. Nothing mutates it at runtime.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One line of a loot table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Item name; entries without one never drop
    pub item: Option<String>,
    pub min_quantity: u32,
    pub max_quantity: u32,
    /// Probability in `[0, 1]` that this entry drops at all
    pub drop_chance: f32,
}

impl LootEntry {
    pub fn new(item: &str, min_quantity: u32, max_quantity: u32, drop_chance: f32) -> Self {
        Self {
            item: Some(item.to_string()),
            min_quantity,
            max_quantity,
            drop_chance,
        }
    }
}

/// Which population a creature counts against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationClass {
    Peaceful,
    Hostile,
}

/// Behavior variant plus the tuning only that variant reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Grazes around its spawn point and runs from the player
    Wildlife {
        /// Seconds spent idle between patrol legs (plus up to 1s jitter either way)
        idle_duration: f32,
        /// Patrol radius around the spawn point
        patrol_radius: f32,
    },
    /// Hunts the player at night, burns in daylight
    Shadow {
        patrol_radius: f32,
        /// Health lost per second while the sun is up
        sunlight_damage: f32,
    },
}

impl CreatureKind {
    pub fn wildlife() -> Self {
        CreatureKind::Wildlife {
            idle_duration: 3.0,
            patrol_radius: 15.0,
        }
    }

    pub fn shadow() -> Self {
        CreatureKind::Shadow {
            patrol_radius: 20.0,
            sunlight_damage: 20.0,
        }
    }

    pub fn class(&self) -> PopulationClass {
        match self {
            CreatureKind::Wildlife { .. } => PopulationClass::Peaceful,
            CreatureKind::Shadow { .. } => PopulationClass::Hostile,
        }
    }

    pub fn patrol_radius(&self) -> f32 {
        match self {
            CreatureKind::Wildlife { patrol_radius, .. }
            | CreatureKind::Shadow { patrol_radius, .. } => *patrol_radius,
        }
    }
}

/// Immutable archetype configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureProfile {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    pub run_speed: f32,
    pub detection_range: f32,
    pub flee_range: f32,
    pub attack_range: f32,
    pub damage: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    pub loot: Vec<LootEntry>,
    pub kind: CreatureKind,
}

impl Default for CreatureProfile {
    fn default() -> Self {
        Self {
            name: "Creature".to_string(),
            max_health: 50.0,
            move_speed: 3.0,
            run_speed: 6.0,
            detection_range: 15.0,
            flee_range: 25.0,
            attack_range: 2.0,
            damage: 0.0,
            attack_cooldown: 2.0,
            loot: Vec::new(),
            kind: CreatureKind::wildlife(),
        }
    }
}

impl CreatureProfile {
    pub fn deer() -> Self {
        Self {
            name: "Deer".to_string(),
            max_health: 60.0,
            move_speed: 3.0,
            run_speed: 7.0,
            detection_range: 15.0,
            flee_range: 25.0,
            loot: vec![
                LootEntry::new("Venison", 1, 2, 1.0),
                LootEntry::new("Hide", 1, 1, 0.6),
            ],
            ..Self::default()
        }
    }

    pub fn rabbit() -> Self {
        Self {
            name: "Rabbit".to_string(),
            max_health: 20.0,
            move_speed: 2.5,
            run_speed: 8.0,
            detection_range: 10.0,
            flee_range: 18.0,
            loot: vec![LootEntry::new("Rabbit Meat", 1, 1, 1.0)],
            kind: CreatureKind::Wildlife {
                idle_duration: 2.0,
                patrol_radius: 8.0,
            },
            ..Self::default()
        }
    }

    pub fn shadow_creature() -> Self {
        Self {
            name: "Shadow Creature".to_string(),
            max_health: 80.0,
            move_speed: 3.5,
            run_speed: 5.5,
            detection_range: 15.0,
            flee_range: 0.0,
            attack_range: 2.0,
            damage: 10.0,
            attack_cooldown: 2.0,
            loot: vec![LootEntry::new("Shadow Essence", 1, 3, 0.5)],
            kind: CreatureKind::shadow(),
        }
    }

    pub fn class(&self) -> PopulationClass {
        self.kind.class()
    }

    /// Roll every loot entry independently.
    ///
    /// Returns `(item, quantity)` for each entry that dropped; quantity is
    /// uniform in `min_quantity..=max_quantity`.
    pub fn roll_loot<R: Rng>(&self, rng: &mut R) -> Vec<(&str, u32)> {
        self.loot
            .iter()
            .filter_map(|entry| {
                let item = entry.item.as_deref()?;
                if rng.random::<f32>() >= entry.drop_chance {
                    return None;
                }
                let low = entry.min_quantity.min(entry.max_quantity);
                let high = entry.min_quantity.max(entry.max_quantity);
                Some((item, rng.random_range(low..=high)))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidProfile {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.max_health.is_nan() || self.max_health <= 0.0 {
            return Err(invalid("max_health must be positive"));
        }
        if [self.move_speed, self.run_speed]
            .iter()
            .any(|v| v.is_nan() || *v <= 0.0)
        {
            return Err(invalid("speeds must be positive"));
        }
        let non_negative = [
            self.detection_range,
            self.flee_range,
            self.attack_range,
            self.damage,
            self.attack_cooldown,
        ];
        if non_negative.iter().any(|v| v.is_nan() || *v < 0.0) {
            return Err(invalid("ranges, damage and cooldown must be non-negative"));
        }
        for entry in &self.loot {
            if entry.min_quantity > entry.max_quantity {
                return Err(invalid("loot min_quantity exceeds max_quantity"));
            }
            if !(0.0..=1.0).contains(&entry.drop_chance) {
                return Err(invalid("loot drop_chance must be within [0, 1]"));
            }
        }
        match self.kind {
            CreatureKind::Wildlife {
                idle_duration,
                patrol_radius,
            } if [idle_duration, patrol_radius]
                .iter()
                .any(|v| v.is_nan() || *v < 0.0) =>
            {
                Err(invalid("idle_duration and patrol_radius must be non-negative"))
            }
            CreatureKind::Shadow {
                patrol_radius,
                sunlight_damage,
            } if patrol_radius.is_nan()
                || patrol_radius < 0.0
                || sunlight_damage.is_nan()
                || sunlight_damage <= 0.0 =>
            {
                Err(invalid(
                    "patrol_radius must be non-negative and sunlight_damage positive",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_presets_are_valid() {
        for profile in [
            CreatureProfile::deer(),
            CreatureProfile::rabbit(),
            CreatureProfile::shadow_creature(),
        ] {
            assert!(profile.validate().is_ok(), "{} failed", profile.name);
        }
    }

    #[test]
    fn test_kind_decides_class() {
        assert_eq!(CreatureProfile::deer().class(), PopulationClass::Peaceful);
        assert_eq!(
            CreatureProfile::shadow_creature().class(),
            PopulationClass::Hostile
        );
    }

    #[test]
    fn test_certain_loot_always_drops_in_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let profile = CreatureProfile {
            loot: vec![LootEntry::new("Venison", 2, 4, 1.0)],
            ..CreatureProfile::deer()
        };

        for _ in 0..200 {
            let drops = profile.roll_loot(&mut rng);
            assert_eq!(drops.len(), 1);
            assert_eq!(drops[0].0, "Venison");
            assert!((2..=4).contains(&drops[0].1));
        }
    }

    #[test]
    fn test_impossible_loot_never_drops() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let profile = CreatureProfile {
            loot: vec![LootEntry::new("Hide", 1, 1, 0.0)],
            ..CreatureProfile::deer()
        };

        for _ in 0..200 {
            assert!(profile.roll_loot(&mut rng).is_empty());
        }
    }

    #[test]
    fn test_entry_without_item_is_skipped() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let profile = CreatureProfile {
            loot: vec![LootEntry {
                item: None,
                min_quantity: 1,
                max_quantity: 1,
                drop_chance: 1.0,
            }],
            ..CreatureProfile::default()
        };
        assert!(profile.roll_loot(&mut rng).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_loot() {
        let profile = CreatureProfile {
            loot: vec![LootEntry::new("Hide", 3, 1, 0.5)],
            ..CreatureProfile::deer()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidProfile { .. })
        ));

        let profile = CreatureProfile {
            loot: vec![LootEntry::new("Hide", 1, 1, 1.5)],
            ..CreatureProfile::deer()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_health() {
        let profile = CreatureProfile {
            max_health: 0.0,
            ..CreatureProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_fields() {
        let speed = CreatureProfile {
            run_speed: f32::NAN,
            ..CreatureProfile::deer()
        };
        assert!(speed.validate().is_err());

        let cooldown = CreatureProfile {
            attack_cooldown: f32::NAN,
            ..CreatureProfile::shadow_creature()
        };
        assert!(cooldown.validate().is_err());

        let burn = CreatureProfile {
            kind: CreatureKind::Shadow {
                patrol_radius: 20.0,
                sunlight_damage: f32::NAN,
            },
            ..CreatureProfile::shadow_creature()
        };
        assert!(burn.validate().is_err());
    }
}
