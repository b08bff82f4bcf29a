//! World management - creatures, the spawner and the day/night clock

pub mod day_night;
#[allow(clippy::module_inception)]
mod world;

pub use crate::creature::Environment;
pub use day_night::{DayNight, DayNightConfig, DayNightCycle};
pub use world::{TickSummary, World};
