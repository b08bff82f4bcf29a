//! Day/night clock
//!
//! Creatures only read [`DayNight`]. [`DayNightCycle`] is the clock the
//! headless driver advances each frame.

use serde::{Deserialize, Serialize};

/// Read-only view of the sky
pub trait DayNight {
    fn is_night(&self) -> bool;

    /// Time of day in `[0, 1)`: 0 = midnight, 0.5 = noon
    fn time_of_day(&self) -> f32;
}

/// Night starts after this time of day (about 8 PM)
pub const DUSK: f32 = 0.83;
/// Night ends before this time of day (about 5 AM)
pub const DAWN: f32 = 0.21;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightConfig {
    /// Length of a full day in real-time minutes
    pub day_length_minutes: f32,
    /// Time of day when the simulation starts
    pub start_time_of_day: f32,
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            day_length_minutes: 20.0,
            start_time_of_day: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DayNightCycle {
    time_of_day: f32,
    day_length_seconds: f32,
}

impl DayNightCycle {
    pub fn new(config: &DayNightConfig) -> Self {
        Self {
            time_of_day: wrap_time_of_day(config.start_time_of_day),
            day_length_seconds: (config.day_length_minutes * 60.0).max(f32::EPSILON),
        }
    }

    /// A clock frozen at `time_of_day` until advanced
    pub fn at(time_of_day: f32) -> Self {
        let mut cycle = Self::new(&DayNightConfig::default());
        cycle.set_time_of_day(time_of_day);
        cycle
    }

    pub fn set_time_of_day(&mut self, time_of_day: f32) {
        self.time_of_day = wrap_time_of_day(time_of_day);
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.set_time_of_day(self.time_of_day + delta_time / self.day_length_seconds);
    }

    /// Current time as a 0-24 hour value
    pub fn hour(&self) -> f32 {
        self.time_of_day * 24.0
    }
}

/// Wrap into `[0, 1)`. `rem_euclid` rounds tiny negative inputs up to exactly 1.
fn wrap_time_of_day(time_of_day: f32) -> f32 {
    let wrapped = time_of_day.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new(&DayNightConfig::default())
    }
}

impl DayNight for DayNightCycle {
    fn is_night(&self) -> bool {
        self.time_of_day < DAWN || self.time_of_day > DUSK
    }

    fn time_of_day(&self) -> f32 {
        self.time_of_day
    }
}
