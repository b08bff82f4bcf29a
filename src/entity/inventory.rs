//! Items dropped by creatures and the inventory they end up in
//!
//! The behavior code only sees [`LootSink`]. [`GroundLoot`] is the in-crate
//! sink used by the headless driver: it keeps pickups lying in the world until
//! the player walks over them.

use glam::Vec3;

/// Receives loot rolled from a creature's loot table on death
pub trait LootSink {
    /// Place `quantity` of `item` in the world at `position`
    fn deposit(&mut self, item: &str, quantity: u32, position: Vec3);
}

/// Maximum items per inventory slot
pub const MAX_STACK: u32 = 99;

/// A stack of identical items in an inventory slot
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: String,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        ItemStack {
            item: item.into(),
            count,
        }
    }

    /// Add items to this stack, returns amount that didn't fit
    pub fn add(&mut self, amount: u32) -> u32 {
        let space = MAX_STACK.saturating_sub(self.count);
        let to_add = amount.min(space);
        self.count += to_add;
        amount - to_add
    }

    pub fn is_full(&self) -> bool {
        self.count >= MAX_STACK
    }
}

/// Slot-based player inventory
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Inventory {
            slots: vec![None; max_slots],
        }
    }

    /// Try to add items to the inventory.
    /// Returns the amount that couldn't be added (0 if all added successfully)
    pub fn add_item(&mut self, item: &str, mut amount: u32) -> u32 {
        // Top up existing stacks first
        for stack in self.slots.iter_mut().flatten() {
            if stack.item == item && !stack.is_full() {
                amount = stack.add(amount);
                if amount == 0 {
                    return 0;
                }
            }
        }

        while amount > 0 {
            let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
                break;
            };
            let to_add = amount.min(MAX_STACK);
            *slot = Some(ItemStack::new(item, to_add));
            amount -= to_add;
        }

        amount
    }

    /// Count how many of a specific item are in the inventory
    pub fn count_item(&self, item: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item == item)
            .map(|stack| stack.count)
            .sum()
    }

    pub fn used_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(24)
    }
}

/// A pickup lying in the world
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub item: String,
    pub quantity: u32,
    pub position: Vec3,
}

/// Loot sink that keeps every drop on the ground until collected
#[derive(Debug, Default)]
pub struct GroundLoot {
    items: Vec<DroppedItem>,
}

impl GroundLoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[DroppedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move every pickup within `radius` of `position` into `inventory`.
    ///
    /// Pickups that only partially fit stay on the ground with the remainder.
    /// Returns the number of items collected.
    pub fn collect_near(&mut self, position: Vec3, radius: f32, inventory: &mut Inventory) -> u32 {
        let mut collected = 0;
        self.items.retain_mut(|drop| {
            if drop.position.distance(position) > radius {
                return true;
            }
            let left = inventory.add_item(&drop.item, drop.quantity);
            collected += drop.quantity - left;
            drop.quantity = left;
            left > 0
        });
        collected
    }
}

impl LootSink for GroundLoot {
    fn deposit(&mut self, item: &str, quantity: u32, position: Vec3) {
        log::debug!(
            "{} x{} dropped at ({:.1}, {:.1}, {:.1})",
            item,
            quantity,
            position.x,
            position.y,
            position.z
        );
        self.items.push(DroppedItem {
            item: item.to_string(),
            quantity,
            position,
        });
    }
}
