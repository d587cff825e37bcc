//! Equipment slots

use serde::{Deserialize, Serialize};

use crate::combat::DamageType;
use crate::stats::AbilityType;

/// A kind an item in a slot may plausibly modify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAffinity {
    Ability(AbilityType),
    Damage(DamageType),
}

/// Places an item can be worn. Each slot holds at most one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Helmet,
    Armor,
    Bracers,
    Ring,
    Belt,
    Boots,
    Weapon,
    Shield,
}

impl EquipmentSlot {
    /// Every slot, in equip-search order
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Helmet,
            EquipmentSlot::Armor,
            EquipmentSlot::Bracers,
            EquipmentSlot::Ring,
            EquipmentSlot::Belt,
            EquipmentSlot::Boots,
            EquipmentSlot::Weapon,
            EquipmentSlot::Shield,
        ]
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Bracers => "Bracers",
            EquipmentSlot::Ring => "Ring",
            EquipmentSlot::Belt => "Belt",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Shield => "Shield",
        }
    }

    /// Kinds associated with the slot. Descriptive only: equipping never
    /// checks an item's bonuses against this list.
    pub fn affinities(&self) -> &'static [SlotAffinity] {
        use AbilityType::*;
        use SlotAffinity::{Ability, Damage};

        match self {
            EquipmentSlot::Helmet => &[Ability(Int), Ability(Wis), Damage(DamageType::Armor)],
            EquipmentSlot::Armor => &[Damage(DamageType::Armor)],
            EquipmentSlot::Bracers => &[Ability(Str), Damage(DamageType::Armor)],
            EquipmentSlot::Ring => &[
                Ability(Str),
                Ability(Con),
                Ability(Wis),
                Ability(Cha),
                Damage(DamageType::Armor),
            ],
            EquipmentSlot::Belt => &[Ability(Con), Ability(Str), Damage(DamageType::Armor)],
            EquipmentSlot::Boots => &[Ability(Dex), Damage(DamageType::Armor)],
            EquipmentSlot::Weapon | EquipmentSlot::Shield => {
                &[Ability(Int), Ability(Wis), Damage(DamageType::Armor)]
            }
        }
    }

    /// The ability kinds among [`EquipmentSlot::affinities`]
    pub fn ability_affinities(&self) -> Vec<AbilityType> {
        self.affinities()
            .iter()
            .filter_map(|a| match a {
                SlotAffinity::Ability(kind) => Some(*kind),
                SlotAffinity::Damage(_) => None,
            })
            .collect()
    }
}

impl std::fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
