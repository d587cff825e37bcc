//! Game events and the observer bus
//!
//! Every successful command emits one typed [`GameEvent`]. Events carry ids
//! for lookups and names so they can be described after the subject is gone.

mod bus;

pub use bus::{EventBus, Flow, Observer, SubscriptionId};

use serde::Serialize;

use crate::combat::AttackCheck;
use crate::entity::{EntityId, EquipmentSlot, Item, ItemId, Living, Location};
use crate::level::Tile;

/// Id and display name of a living entity at the time of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub name: String,
}

impl From<&Living> for EntityRef {
    fn from(living: &Living) -> Self {
        Self {
            id: living.id,
            name: living.name.clone(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Id and display name of an item at the time of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    TurnStarted {
        turn: u32,
    },
    EntityActivated {
        entity: EntityRef,
    },
    DiceRolled {
        source: Option<EntityRef>,
        label: Option<String>,
        count: u32,
        sides: u32,
        modifier: i32,
        value: i32,
    },
    Moved {
        entity: EntityRef,
        to: Location,
    },
    AttackCheck {
        source: EntityRef,
        target: EntityRef,
        check: AttackCheck,
    },
    Damaged {
        source: EntityRef,
        target: EntityRef,
        amount: i32,
    },
    Killed {
        source: EntityRef,
        target: EntityRef,
    },
    Equip {
        entity: EntityRef,
        item: ItemRef,
        slot: EquipmentSlot,
        unequipped: bool,
    },
    ItemUsed {
        entity: EntityRef,
        item: ItemRef,
    },
    DoorToggled {
        entity: EntityRef,
        at: Location,
        from: Tile,
        to: Tile,
    },
    InventoryOpened {
        entity: EntityRef,
        owner: EntityRef,
    },
    InventoryItemTaken {
        entity: EntityRef,
        owner: EntityRef,
        item: ItemRef,
    },
    GoldTaken {
        entity: EntityRef,
        owner: EntityRef,
        amount: i64,
    },
    ItemPickedUp {
        entity: EntityRef,
        item: ItemRef,
        at: Location,
    },
    NextLevel {
        depth: u32,
    },
    LevelReset {
        depth: u32,
    },
    PlayerSpawned {
        entity: EntityRef,
        at: Location,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::TurnStarted { turn } => write!(f, "Turn {} begins.", turn),
            GameEvent::EntityActivated { entity } => write!(f, "{} will now move.", entity),
            GameEvent::DiceRolled {
                source,
                label,
                count,
                sides,
                modifier,
                value,
            } => {
                if let Some(source) = source {
                    write!(f, "{} ", source)?;
                }
                write!(f, "rolled {}d{}", count, sides)?;
                if *modifier != 0 {
                    write!(f, "{:+}", modifier)?;
                }
                if let Some(label) = label {
                    write!(f, " ({})", label)?;
                }
                write!(f, " = {}", value)
            }
            GameEvent::Moved { entity, to } => write!(f, "{} moved to {}", entity, to),
            GameEvent::AttackCheck {
                source,
                target,
                check,
            } => write!(
                f,
                "{} rolled {} + {} (bonus) for total of {} and {} {} (AC: {})",
                source,
                check.roll,
                check.bonus,
                check.total(),
                if check.hit() { "hit" } else { "missed" },
                target,
                check.armor_class
            ),
            GameEvent::Damaged {
                source,
                target,
                amount,
            } => write!(f, "{} hit {} for {} damage", source, target, amount),
            GameEvent::Killed { source, target } => write!(f, "{} killed {}", source, target),
            GameEvent::Equip {
                entity,
                item,
                slot,
                unequipped,
            } => {
                let (verb, connector) = if *unequipped {
                    ("unequipped", "from")
                } else {
                    ("equipped", "to")
                };
                write!(f, "{} {} {} {} {} slot", entity, verb, item, connector, slot)
            }
            GameEvent::ItemUsed { entity, item } => write!(f, "{} used {}", entity, item),
            GameEvent::DoorToggled { entity, at, to, .. } => {
                let verb = if *to == Tile::DoorOpen { "opened" } else { "closed" };
                write!(f, "{} {} the door at {}", entity, verb, at)
            }
            GameEvent::InventoryOpened { entity, owner } => {
                write!(f, "{} opened the inventory of {}", entity, owner)
            }
            GameEvent::InventoryItemTaken {
                entity,
                owner,
                item,
            } => write!(f, "{} took {} from inventory of {}", entity, item, owner),
            GameEvent::GoldTaken {
                entity,
                owner,
                amount,
            } => write!(f, "{} took {} gold from {}", entity, amount, owner),
            GameEvent::ItemPickedUp { entity, item, at } => {
                write!(f, "{} picked up {} at {}", entity, item, at)
            }
            GameEvent::NextLevel { depth } => write!(f, "Descending to level {}.", depth),
            GameEvent::LevelReset { .. } => write!(f, "Restarting level."),
            GameEvent::PlayerSpawned { entity, .. } => write!(f, "Player {} spawned.", entity),
        }
    }
}
