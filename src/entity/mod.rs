//! Entity model - players, NPCs, items and what they carry

mod equipment;
mod inventory;
mod item;
mod living;
mod location;
mod slot;

pub use equipment::{armor, shield, sword, trinket, TRINKET_SLOTS};
pub use inventory::{Inventory, DEFAULT_MAX_ITEMS};
pub use item::{Item, ItemKind, DEFAULT_POTION_TURNS};
pub use living::{
    AbilityLine, AbilitySummary, DamageSummary, Living, LivingKind, PlayerClass, Species,
    UNARMED_DAMAGE,
};
pub use location::Location;
pub use slot::{EquipmentSlot, SlotAffinity};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::{AbilityType, ModifierSet};

/// Unique identifier of a living entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything placed on the level grid
pub trait HasLocation {
    fn location(&self) -> Location;
    fn set_location(&mut self, location: Location);
}

/// Anything carrying an inventory
pub trait HasInventory {
    fn inventory(&self) -> &Inventory;
    fn inventory_mut(&mut self) -> &mut Inventory;
}

/// Anything with derived ability statistics
pub trait HasAbilityScores {
    /// Every ability layer that applies to the entity
    fn ability_modifiers(&self) -> ModifierSet<AbilityType>;

    /// Modifier for one ability kind, floored at -5
    fn ability_modifier(&self, kind: AbilityType) -> i32;

    /// Threshold an attack roll must meet or beat
    fn armor_class(&self) -> i32;
}

impl HasLocation for Item {
    fn location(&self) -> Location {
        self.location
    }

    fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}
