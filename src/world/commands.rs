//! Movement, equipment, item and inventory commands

use tracing::debug;

use super::{TimedEffect, World};
use crate::entity::{EntityId, EquipmentSlot, HasInventory, ItemId, ItemKind, Location};
use crate::events::{GameEvent, ItemRef};
use crate::level::{CellTrait, Tile};

impl World {
    /// Whether the tile and its arrival trait let `entity` stand at `loc`
    pub fn accepts(&self, entity: EntityId, loc: Location) -> bool {
        if !self.level.is_walkable(loc) {
            return false;
        }
        match self.level.trait_at(loc) {
            Some(CellTrait::NextLevel) => {
                self.living(entity).is_some_and(|l| l.is_player())
                    && self.npcs.iter().all(|n| !n.is_alive())
            }
            None => true,
        }
    }

    /// Whether a living body or any loose item stands at `loc`
    pub fn is_blocked(&self, loc: Location) -> bool {
        self.entities_at(loc).iter().any(|o| o.blocks())
    }

    /// Step a living entity by `delta`
    pub fn move_entity(&mut self, id: EntityId, delta: Location) -> bool {
        let Some(entity) = self.living(id).filter(|l| l.is_alive()) else {
            return false;
        };
        let to = entity.location + delta;

        if !self.accepts(id, to) {
            debug!("{} cannot enter {}", entity.name, to);
            return false;
        }
        if self.is_blocked(to) {
            debug!("{} blocked at {}", entity.name, to);
            return false;
        }

        let Some(entity) = self.living_mut(id) else {
            return false;
        };
        entity.location = to;
        let entity = (&*entity).into();
        self.emit(GameEvent::Moved { entity, to });
        self.arrive(to);
        true
    }

    /// Place a living entity at `to` without announcing it.
    /// Subject to the same checks as a move, and still runs the arrival trait.
    pub fn teleport(&mut self, id: EntityId, to: Location) -> bool {
        if !self.accepts(id, to) || self.is_blocked(to) {
            return false;
        }
        let Some(entity) = self.living_mut(id) else {
            return false;
        };
        entity.location = to;
        self.arrive(to);
        true
    }

    /// Run the arrival trait of a cell
    fn arrive(&mut self, at: Location) {
        if let Some(CellTrait::NextLevel) = self.level.trait_at(at) {
            self.descend();
        }
    }

    /// Equip a carried item into its first fitting slot
    pub fn equip_item(&mut self, id: EntityId, item: ItemId) -> Option<EquipmentSlot> {
        let living = self.living_mut(id)?;
        let slot = living.inventory_mut().equip_item(item)?;
        let item = ItemRef::from(living.inventory().equipment_in_slot(slot)?);
        let entity = (&*living).into();
        self.emit(GameEvent::Equip {
            entity,
            item,
            slot,
            unequipped: false,
        });
        Some(slot)
    }

    /// Equip a carried item into a specific slot
    pub fn equip_item_in(&mut self, id: EntityId, item: ItemId, slot: EquipmentSlot) -> bool {
        let Some(living) = self.living_mut(id) else {
            return false;
        };
        if !living.inventory_mut().equip_slot(slot, item) {
            return false;
        }
        let Some(item) = living.inventory().equipment_in_slot(slot).map(ItemRef::from) else {
            return false;
        };
        let entity = (&*living).into();
        self.emit(GameEvent::Equip {
            entity,
            item,
            slot,
            unequipped: false,
        });
        true
    }

    /// Move a slot's item back into unequipped storage
    pub fn unequip_slot(&mut self, id: EntityId, slot: EquipmentSlot) -> bool {
        let Some(living) = self.living_mut(id) else {
            return false;
        };
        let Some(item) = living.inventory().equipment_in_slot(slot).map(ItemRef::from) else {
            return false;
        };
        if living.inventory_mut().unequip_slot(slot).is_none() {
            return false;
        }
        let entity = (&*living).into();
        self.emit(GameEvent::Equip {
            entity,
            item,
            slot,
            unequipped: true,
        });
        true
    }

    pub(crate) fn carried_item_is_wearable(&self, id: EntityId, item: ItemId) -> bool {
        self.living(id)
            .and_then(|l| l.inventory().get(item))
            .is_some_and(|i| i.is_equippable())
    }

    /// Use a carried item.
    ///
    /// Wearables are equipped (announced as an equip). Consumables and
    /// potions are used up; a potion's ability layer is added to the user
    /// until its turns run out. Basic items cannot be used.
    pub fn use_item(&mut self, id: EntityId, item: ItemId) -> bool {
        let Some(kind) = self
            .living(id)
            .and_then(|l| l.inventory().get(item))
            .map(|i| i.kind.clone())
        else {
            return false;
        };

        let turns = match kind {
            ItemKind::Basic => return false,
            ItemKind::Equippable { .. } | ItemKind::Weapon { .. } => {
                return self.equip_item(id, item).is_some();
            }
            ItemKind::Consumable => None,
            ItemKind::Potion { turns } => Some(turns),
        };

        let Some(living) = self.living_mut(id) else {
            return false;
        };
        let Some(used) = living.inventory_mut().drop_item(item) else {
            return false;
        };
        if let Some(turns) = turns {
            let layer = living.base_modifiers_mut().add(used.ability.clone());
            self.subscribe(TimedEffect::new(id, layer, turns));
        }

        let Some(entity) = self.entity_ref(id) else {
            return false;
        };
        self.emit(GameEvent::ItemUsed {
            entity,
            item: ItemRef::from(&used),
        });
        true
    }

    /// Open or close an adjacent door
    pub fn toggle_door(&mut self, id: EntityId, at: Location) -> bool {
        let Some(entity) = self.living(id).filter(|l| l.is_alive()) else {
            return false;
        };
        if entity.location.distance_to(at) > 1 {
            return false;
        }
        let from = match self.level.tile(at) {
            Some(tile) if tile.is_door() => tile,
            _ => return false,
        };
        let to = if from == Tile::DoorOpen {
            // Nothing may be caught in a closing door
            if self.is_blocked(at) {
                return false;
            }
            Tile::DoorClosed
        } else {
            Tile::DoorOpen
        };

        let entity = entity.into();
        self.level.set_tile(at, to);
        self.emit(GameEvent::DoorToggled {
            entity,
            at,
            from,
            to,
        });
        true
    }

    fn within_reach(&self, id: EntityId, owner: EntityId) -> bool {
        match (self.living(id), self.living(owner)) {
            (Some(a), Some(b)) => id != owner && a.is_alive() && a.location.is_adjacent(b.location),
            _ => false,
        }
    }

    /// Look into an adjacent entity's inventory
    pub fn open_inventory(&mut self, id: EntityId, owner: EntityId) -> bool {
        if !self.within_reach(id, owner) {
            return false;
        }
        let (Some(entity), Some(owner)) = (self.entity_ref(id), self.entity_ref(owner)) else {
            return false;
        };
        self.emit(GameEvent::InventoryOpened { entity, owner });
        true
    }

    /// Move an item, worn or not, from an adjacent entity into the taker's
    /// unequipped storage
    pub fn take_inventory_item(&mut self, id: EntityId, owner: EntityId, item: ItemId) -> bool {
        if !self.within_reach(id, owner) {
            return false;
        }
        let has_room = self.living(id).is_some_and(|l| !l.inventory().is_full());
        if !has_room {
            return false;
        }

        let Some(taken) = self
            .living_mut(owner)
            .and_then(|o| o.inventory_mut().take(item))
        else {
            return false;
        };
        let item = ItemRef::from(&taken);
        if let Some(taker) = self.living_mut(id) {
            if let Err(back) = taker.inventory_mut().add_item(taken) {
                // Already checked for room; keep the item with its owner
                if let Some(o) = self.living_mut(owner) {
                    let _ = o.inventory_mut().add_item(back);
                }
                return false;
            }
        }

        let (Some(entity), Some(owner)) = (self.entity_ref(id), self.entity_ref(owner)) else {
            return false;
        };
        self.emit(GameEvent::InventoryItemTaken {
            entity,
            owner,
            item,
        });
        true
    }

    /// Move gold from an adjacent entity. An amount of 0 takes everything.
    /// Never takes more than the owner has.
    pub fn take_inventory_gold(&mut self, id: EntityId, owner: EntityId, amount: i64) -> bool {
        if !self.within_reach(id, owner) || amount < 0 {
            return false;
        }
        let available = self.living(owner).map_or(0, |o| o.inventory().gold());
        let amount = if amount == 0 { available } else { amount };
        if amount <= 0 || amount > available {
            return false;
        }

        if let Some(o) = self.living_mut(owner) {
            o.inventory_mut().add_gold(-amount);
        }
        if let Some(t) = self.living_mut(id) {
            t.inventory_mut().add_gold(amount);
        }

        let (Some(entity), Some(owner)) = (self.entity_ref(id), self.entity_ref(owner)) else {
            return false;
        };
        self.emit(GameEvent::GoldTaken {
            entity,
            owner,
            amount,
        });
        true
    }

    /// Pick up an adjacent loose item
    pub fn pick_up(&mut self, id: EntityId, item: ItemId) -> bool {
        let Some(taker) = self.living(id).filter(|l| l.is_alive()) else {
            return false;
        };
        if taker.inventory().is_full() {
            return false;
        }
        let Some(pos) = self
            .items
            .iter()
            .position(|i| i.id == item && i.location.is_adjacent(taker.location))
        else {
            return false;
        };

        let loose = self.items.remove(pos);
        let at = loose.location;
        let item = ItemRef::from(&loose);
        if let Some(taker) = self.living_mut(id) {
            if let Err(back) = taker.inventory_mut().add_item(loose) {
                self.items.insert(pos, back);
                return false;
            }
        }

        let Some(entity) = self.entity_ref(id) else {
            return false;
        };
        self.emit(GameEvent::ItemPickedUp { entity, item, at });
        true
    }
}
