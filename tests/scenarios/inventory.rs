//! Inventory scenario tests
//!
//! Tests equipment, item use, potions, pick-up and transfers between entities

use delve::combat::DiceRoll;
use delve::entity::{EquipmentSlot, HasAbilityScores, HasInventory, Item, Location};
use delve::events::GameEvent;
use delve::stats::{AbilityType, Modifier};
use delve::Action;

use crate::harness::{fighter, monster, turn_of, Recorder, TestWorld};

/// Test: Equip then unequip leaves the item in storage exactly once
#[test]
fn test_equip_unequip_round_trip() {
    let mut tank = fighter("Tank", 10);
    let sword = Item::weapon("Sword", DiceRoll::new(1, 8, 0));
    let sword_id = sword.id;
    tank.inventory_mut().add_item(sword).unwrap();

    let mut world = TestWorld::new(4, 4).player(tank).start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));

    assert!(world.perform(id, Action::Equip(sword_id)));
    assert_eq!(world.moves_remaining(), 0);
    let inventory = world.living(id).unwrap().inventory();
    assert_eq!(inventory.slot_of(sword_id), Some(EquipmentSlot::Weapon));
    assert_eq!(inventory.item_count(), 0);
    assert_eq!(world.living(id).unwrap().weapon_damage(), DiceRoll::new(1, 8, 0));

    world.run_step();
    assert!(turn_of(&mut world, id));
    assert!(world.perform(id, Action::Unequip(EquipmentSlot::Weapon)));
    let inventory = world.living(id).unwrap().inventory();
    assert!(!inventory.is_slot_equipped(EquipmentSlot::Weapon));
    assert_eq!(inventory.items().iter().filter(|i| i.id == sword_id).count(), 1);
}

/// Test: Wrong slot and unknown items are refused for free
#[test]
fn test_equip_rejections_cost_nothing() {
    let mut tank = fighter("Tank", 10);
    let helmet = Item::equippable("Helmet", EquipmentSlot::Helmet);
    let helmet_id = helmet.id;
    tank.inventory_mut().add_item(helmet).unwrap();

    let mut world = TestWorld::new(4, 4).player(tank).start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));
    let recorder = Recorder::attach(&mut world);

    assert!(!world.perform(id, Action::EquipSlot(helmet_id, EquipmentSlot::Boots)));
    assert!(!world.perform(id, Action::Equip(Item::basic("Ghost").id)));
    assert!(!world.perform(id, Action::Unequip(EquipmentSlot::Ring)));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN);
    assert!(recorder.events().is_empty());
}

/// Test: Armor raises armor class while worn
#[test]
fn test_armor_counts_toward_armor_class() {
    let mut tank = fighter("Tank", 10);
    let plate = Item::equippable("Plate", EquipmentSlot::Armor)
        .with_damage(delve::combat::DamageType::Armor, 3);
    let plate_id = plate.id;
    tank.inventory_mut().add_item(plate).unwrap();

    let mut world = TestWorld::new(4, 4).player(tank).start();
    let id = world.players()[0].id;
    let before = world.living(id).unwrap().armor_class();
    assert!(world.equip_item(id, plate_id).is_some());
    assert_eq!(world.living(id).unwrap().armor_class(), before + 3);
}

/// Test: A potion lifts a stat for its turns, then exactly that layer goes
#[test]
fn test_potion_wears_off() {
    let mut tank = fighter("Tank", 10);
    let potion = Item::potion(Modifier::single(AbilityType::Str, 4), 2);
    let potion_id = potion.id;
    tank.inventory_mut().add_item(potion).unwrap();

    let mut world = TestWorld::new(4, 4).player(tank).start();
    let id = world.players()[0].id;
    let strength = |w: &delve::World| w.living(id).unwrap().ability_modifier(AbilityType::Str);
    let base = strength(&world);
    assert!(turn_of(&mut world, id));
    let recorder = Recorder::attach(&mut world);

    assert!(world.perform(id, Action::Use(potion_id)));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 1);
    assert_eq!(recorder.count(|e| matches!(e, GameEvent::ItemUsed { .. })), 1);
    assert!(!world.living(id).unwrap().inventory().has_item(potion_id, true));
    assert_eq!(strength(&world), base + 2);

    world.next_turn();
    assert_eq!(strength(&world), base + 2);
    world.next_turn();
    assert_eq!(strength(&world), base);
}

/// Test: Basic items cannot be used
#[test]
fn test_basic_item_is_inert() {
    let mut tank = fighter("Tank", 10);
    let rock = Item::basic("Rock");
    let rock_id = rock.id;
    tank.inventory_mut().add_item(rock).unwrap();

    let mut world = TestWorld::new(4, 4).player(tank).start();
    let id = world.players()[0].id;
    assert!(!world.use_item(id, rock_id));
    assert!(world.living(id).unwrap().inventory().has_item(rock_id, false));
}

/// Test: Adjacent loose items can be picked up once
#[test]
fn test_pick_up_adjacent_item() {
    let gem = Item::basic("Gem").at(Location::new(1, 1));
    let gem_id = gem.id;
    let far = Item::basic("Far").at(Location::new(3, 3));
    let far_id = far.id;
    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .item(gem)
        .item(far)
        .start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));

    assert!(!world.perform(id, Action::PickUp(far_id)));
    assert!(world.perform(id, Action::PickUp(gem_id)));
    assert!(!world.perform(id, Action::PickUp(gem_id)));
    assert_eq!(world.items().len(), 1);
    assert!(world.living(id).unwrap().inventory().has_item(gem_id, false));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 1);
}

/// Test: Loot a fallen monster's gear and gold
#[test]
fn test_loot_adjacent_body() {
    let mut orc = monster("Orc", 4, Location::new(1, 0));
    let axe = Item::weapon("Axe", DiceRoll::new(1, 6, 0));
    let axe_id = axe.id;
    orc.inventory_mut().add_item(axe).unwrap();
    orc.inventory_mut().equip_item(axe_id);
    orc.inventory_mut().set_gold(12);

    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .npc(orc)
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    world.damage(id, orc, 10);
    let recorder = Recorder::attach(&mut world);

    assert!(world.open_inventory(id, orc));
    assert!(world.take_inventory_item(id, orc, axe_id));
    assert!(!world.take_inventory_gold(id, orc, 13));
    assert!(!world.take_inventory_gold(id, orc, -1));
    assert!(world.take_inventory_gold(id, orc, 5));
    assert!(world.take_inventory_gold(id, orc, 0));
    assert!(!world.take_inventory_gold(id, orc, 0));

    let tank = world.living(id).unwrap();
    assert_eq!(tank.inventory().gold(), 12);
    assert!(tank.inventory().has_item(axe_id, false));
    assert_eq!(world.living(orc).unwrap().inventory().gold(), 0);
    assert_eq!(
        recorder.count(|e| matches!(e, GameEvent::GoldTaken { .. })),
        2
    );
    assert_eq!(recorder.events().len(), 4);
}

/// Test: Looting through actions is turn-gated and costs one move each
#[test]
fn test_looting_actions_are_turn_gated() {
    let mut orc = monster("Orc", 4, Location::new(1, 0));
    let dagger = Item::basic("Dagger");
    let dagger_id = dagger.id;
    orc.inventory_mut().add_item(dagger).unwrap();
    orc.inventory_mut().set_gold(8);

    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .player(fighter("Nimble", 10))
        .npc(orc)
        .start();
    let tank = world.players()[0].id;
    let nimble = world.players()[1].id;
    let orc = world.npcs()[0].id;
    world.damage(tank, orc, 10);
    assert!(turn_of(&mut world, tank));

    assert!(!world.perform(nimble, Action::TakeGold(orc, 0)));
    assert!(world.perform(tank, Action::TakeItem(orc, dagger_id)));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 1);
    assert!(world.perform(tank, Action::TakeGold(orc, 0)));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 2);

    // Nothing left to take: rejected and free
    assert!(!world.perform(tank, Action::TakeGold(orc, 0)));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 2);

    let looter = world.living(tank).unwrap();
    assert_eq!(looter.inventory().gold(), 8);
    assert!(looter.inventory().has_item(dagger_id, false));
    assert_eq!(world.living(nimble).unwrap().inventory().gold(), 0);
}
