//! Starting gear and random equipment generation

use super::{EquipmentSlot, Item};
use crate::combat::{DamageType, Dice, DiceRoll};

/// Slots a trinket can be rolled into
pub const TRINKET_SLOTS: [EquipmentSlot; 5] = [
    EquipmentSlot::Helmet,
    EquipmentSlot::Bracers,
    EquipmentSlot::Ring,
    EquipmentSlot::Belt,
    EquipmentSlot::Boots,
];

/// Body armor: ARMOR `1d4 + level/4`
pub fn armor(dice: &mut Dice, level: u32) -> Item {
    let bonus = dice.roll(1, 4, (level / 4) as i32);
    Item::equippable("Armor", EquipmentSlot::Armor).with_damage(DamageType::Armor, bonus)
}

/// A shield: SHIELD `1d2 + level/5`
pub fn shield(dice: &mut Dice, level: u32) -> Item {
    let bonus = dice.roll(1, 2, (level / 5) as i32);
    Item::equippable("Shield", EquipmentSlot::Shield).with_damage(DamageType::Shield, bonus)
}

/// The standard fighter sword, 1d8
pub fn sword() -> Item {
    Item::weapon("Sword", DiceRoll::new(1, 8, 0))
}

/// A non-weapon accessory with a small bonus to one ability the slot is
/// associated with
pub fn trinket(dice: &mut Dice, level: u32) -> Item {
    let slot = TRINKET_SLOTS[(dice.roll(1, TRINKET_SLOTS.len() as u32, -1)) as usize];
    let kinds = slot.ability_affinities();
    let item = Item::equippable(slot.name(), slot);
    if kinds.is_empty() {
        return item;
    }

    let kind = kinds[(dice.roll(1, kinds.len() as u32, -1)) as usize];
    let bonus = dice.roll(1, 2, (level / 10) as i32);
    Item {
        name: format!("{} of {}", slot.name(), kind.name()),
        ..item
    }
    .with_ability(kind, bonus)
}
