//! Items that can lie on the floor or sit in an inventory

use serde::{Deserialize, Serialize};

use super::{EquipmentSlot, ItemId, Location};
use crate::combat::{DamageType, DiceRoll};
use crate::stats::{AbilityType, Modifier};

/// Default number of turn starts a potion lasts
pub const DEFAULT_POTION_TURNS: u32 = 3;

/// What an item does when used or worn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Inert; cannot be used
    Basic,
    /// Used up on use
    Consumable,
    /// Used up on use; grants its ability layer for a number of turn starts
    Potion { turns: u32 },
    /// Worn in exactly one slot
    Equippable { slot: EquipmentSlot },
    /// Worn in the weapon slot; rolls its dice for damage
    Weapon { damage: DiceRoll },
}

/// A single item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Position when lying loose in the level
    pub location: Location,
    pub kind: ItemKind,
    /// Ability bonuses granted while equipped
    pub ability: Modifier<AbilityType>,
    /// Damage and armor bonuses granted while equipped
    pub damage: Modifier<DamageType>,
}

impl Item {
    fn with_kind(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            location: Location::default(),
            kind,
            ability: Modifier::new(),
            damage: Modifier::new(),
        }
    }

    /// An inert item
    pub fn basic(name: impl Into<String>) -> Self {
        Self::with_kind(name, ItemKind::Basic)
    }

    /// A single-use item without further effect
    pub fn consumable(name: impl Into<String>) -> Self {
        Self::with_kind(name, ItemKind::Consumable)
    }

    /// A wearable item for one slot
    pub fn equippable(name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Self::with_kind(name, ItemKind::Equippable { slot })
    }

    /// A weapon dealing `damage` on each successful attack sub-roll
    pub fn weapon(name: impl Into<String>, damage: DiceRoll) -> Self {
        Self::with_kind(name, ItemKind::Weapon { damage })
    }

    /// A potion granting `modifier` for `turns` turn starts.
    /// The name follows the first ability the potion touches.
    pub fn potion(modifier: Modifier<AbilityType>, turns: u32) -> Self {
        let (kind, value) = AbilityType::all()
            .iter()
            .map(|k| (*k, modifier.delta(*k)))
            .find(|(_, v)| *v != 0)
            .unwrap_or((AbilityType::Hp, 0));

        let strength = if value >= 10 {
            "Major "
        } else if value >= 5 {
            ""
        } else {
            "Minor "
        };

        let mut item = Self::with_kind(
            format!("{}Potion of {}", strength, kind.name()),
            ItemKind::Potion { turns },
        );
        item.ability = modifier;
        item
    }

    /// Place the item at a location (builder style)
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Add an ability bonus (builder style)
    pub fn with_ability(mut self, kind: AbilityType, value: i32) -> Self {
        self.ability.set_delta(kind, value);
        self
    }

    /// Add a damage/armor bonus (builder style)
    pub fn with_damage(mut self, kind: DamageType, value: i32) -> Self {
        self.damage.set_delta(kind, value);
        self
    }

    /// The slot this item is worn in, if it is wearable at all
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self.kind {
            ItemKind::Equippable { slot } => Some(slot),
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            _ => None,
        }
    }

    /// Whether this item fits in the given slot
    pub fn fits_in_slot(&self, slot: EquipmentSlot) -> bool {
        self.slot() == Some(slot)
    }

    /// Whether this item can be worn
    pub fn is_equippable(&self) -> bool {
        self.slot().is_some()
    }

    /// Damage dice when wielded
    pub fn weapon_damage(&self) -> Option<DiceRoll> {
        match self.kind {
            ItemKind::Weapon { damage } => Some(damage),
            _ => None,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
