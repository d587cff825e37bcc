//! Inventory storage and equipment rules
//!
//! An inventory has capacity-bounded unequipped storage, one item per
//! equipment slot, and a gold count. An item lives in exactly one of the two
//! places at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EquipmentSlot, Item, ItemId};

/// Default number of unequipped items an inventory can hold
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Items, equipment and gold held by a living entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    equipped: BTreeMap<EquipmentSlot, Item>,
    gold: i64,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ITEMS)
    }
}

impl Inventory {
    /// Create an empty inventory with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty inventory holding at most `capacity` unequipped items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            equipped: BTreeMap::new(),
            gold: 0,
            capacity,
        }
    }

    /// Current gold
    pub fn gold(&self) -> i64 {
        self.gold
    }

    /// Overwrite the gold count
    pub fn set_gold(&mut self, value: i64) {
        self.gold = value;
    }

    /// Add (or, when negative, subtract) gold
    pub fn add_gold(&mut self, value: i64) {
        self.gold += value;
    }

    /// Maximum number of unequipped items
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the maximum number of unequipped items
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Unequipped items
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Equipped items in slot order
    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.equipped.values()
    }

    /// Slot/item pairs in slot order
    pub fn equipment(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        self.equipped.iter().map(|(s, i)| (*s, i))
    }

    /// Number of unequipped items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether unequipped storage is at capacity. Equipped items do not count.
    pub fn is_full(&self) -> bool {
        self.item_count() >= self.capacity
    }

    /// Store an item. Fails (handing the item back) when storage is full or
    /// the item is already held.
    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() || self.has_item(item.id, true) {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an unequipped item. Absent items are a no-op.
    pub fn drop_item(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Remove an item wherever it is held, unequipped or equipped
    pub fn take(&mut self, id: ItemId) -> Option<Item> {
        if let Some(item) = self.drop_item(id) {
            return Some(item);
        }
        let slot = self.slot_of(id)?;
        self.equipped.remove(&slot)
    }

    /// Look up a held item
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items
            .iter()
            .chain(self.equipped.values())
            .find(|i| i.id == id)
    }

    /// Whether the item is in unequipped storage, or optionally equipped
    pub fn has_item(&self, id: ItemId, check_equipped: bool) -> bool {
        self.items.iter().any(|i| i.id == id) || (check_equipped && self.slot_of(id).is_some())
    }

    /// Whether a slot is occupied
    pub fn is_slot_equipped(&self, slot: EquipmentSlot) -> bool {
        self.equipped.contains_key(&slot)
    }

    /// Item in a slot
    pub fn equipment_in_slot(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipped.get(&slot)
    }

    /// The slot currently holding an item
    pub fn slot_of(&self, id: ItemId) -> Option<EquipmentSlot> {
        self.equipped
            .iter()
            .find(|(_, item)| item.id == id)
            .map(|(slot, _)| *slot)
    }

    /// Equip a held item into `slot`.
    ///
    /// Succeeds only if the item fits the slot, is held (unequipped or worn
    /// elsewhere) and the slot is empty. A worn item moves out of its old
    /// slot rather than being duplicated.
    pub fn equip_slot(&mut self, slot: EquipmentSlot, id: ItemId) -> bool {
        let fits = match self.get(id) {
            Some(item) => item.fits_in_slot(slot),
            None => return false,
        };
        if !fits || self.is_slot_equipped(slot) {
            return false;
        }

        let Some(item) = self.take(id) else {
            return false;
        };
        self.equipped.insert(slot, item);
        true
    }

    /// Equip an item into the first slot that accepts it
    pub fn equip_item(&mut self, id: ItemId) -> Option<EquipmentSlot> {
        EquipmentSlot::all()
            .iter()
            .copied()
            .find(|slot| self.equip_slot(*slot, id))
    }

    /// Move a slot's item back into unequipped storage.
    /// Refused when storage is full so the item is never lost.
    pub fn unequip_slot(&mut self, slot: EquipmentSlot) -> Option<ItemId> {
        if self.is_full() {
            return None;
        }
        let item = self.equipped.remove(&slot)?;
        let id = item.id;
        self.items.push(item);
        Some(id)
    }

    /// Unequip an item wherever it is worn
    pub fn unequip_item(&mut self, id: ItemId) -> Option<EquipmentSlot> {
        let slot = self.slot_of(id)?;
        self.unequip_slot(slot).map(|_| slot)
    }

    /// Clear every item, every slot and the gold
    pub fn clear(&mut self) {
        self.items.clear();
        self.equipped.clear();
        self.gold = 0;
    }
}
