pub mod health;
pub mod inventory;
pub mod player;

use std::sync::atomic::{AtomicU64, Ordering};

pub use health::Health;
pub use inventory::{GroundLoot, Inventory, ItemStack, LootSink};
pub use player::{Player, PlayerTarget};

/// Unique identifier for creatures and other live entities.
///
/// Also doubles as the navigation agent handle, so a creature and its agent
/// always share one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Generate a new unique entity ID
    pub fn new() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature#{}", self.0)
    }
}
