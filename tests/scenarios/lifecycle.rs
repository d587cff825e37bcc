//! Lifecycle scenario tests
//!
//! Tests world start, stop, restart, level transitions and built parties

use delve::builder::build_from_descriptor;
use delve::combat::{Dice, DiceRoll};
use delve::entity::{HasInventory, Item, Living, Location};
use delve::events::GameEvent;
use delve::level::{Level, LevelGenerator, Tile};
use delve::{Action, Step, World};

use crate::harness::{fighter, monster, turn_of, Recorder, TestWorld};

/// Test: The party lands on and around the spawn point
#[test]
fn test_start_spawns_party() {
    let mut world = TestWorld::new(5, 5)
        .spawn(Location::new(2, 2))
        .player(fighter("Tank", 10))
        .player(fighter("Nimble", 10))
        .player(fighter("Bully", 10))
        .build();
    let recorder = Recorder::attach(&mut world);
    world.start();

    assert!(world.is_started());
    assert_eq!(world.players()[0].location, Location::new(2, 2));
    let mut spots: Vec<Location> = world.players().iter().map(|p| p.location).collect();
    spots.sort_by_key(|l| (l.x, l.y));
    spots.dedup();
    assert_eq!(spots.len(), 3);
    assert_eq!(
        recorder.count(|e| matches!(e, GameEvent::PlayerSpawned { .. })),
        3
    );
    assert_eq!(recorder.count(|e| matches!(e, GameEvent::TurnStarted { turn: 1 })), 1);
}

/// Test: A stopped world does nothing
#[test]
fn test_stopped_world_is_idle() {
    let mut world = TestWorld::new(3, 3).player(fighter("Tank", 10)).start();
    let id = world.players()[0].id;
    world.stop();
    assert_eq!(world.run_step(), Step::Idle);
    assert!(!world.perform(id, Action::Wait));
}

/// Test: Restart puts monsters back where the level placed them
#[test]
fn test_restart_reseeds_monsters() {
    let mut world = TestWorld::new(6, 6)
        .player(fighter("Tank", 10))
        .npc(monster("Orc", 9, Location::new(4, 4)))
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    world.damage(id, orc, 100);
    assert!(!world.is_alive(orc));

    world.restart();
    let orc = world.living(orc).unwrap();
    assert!(orc.is_alive());
    assert_eq!(orc.hp(), 9);
    assert_eq!(orc.location, Location::new(4, 4));
    assert_eq!(orc.attacker(), None);
    assert_eq!(world.turn_number(), 1);
}

/// Test: An item the party picked up is not put back on the map by a restart
#[test]
fn test_restart_keeps_picked_up_item_with_party() {
    let rock = Item::basic("Rock").at(Location::new(1, 0));
    let rock_id = rock.id;
    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .item(rock)
        .start();
    let id = world.players()[0].id;
    assert!(world.pick_up(id, rock_id));

    world.restart();
    assert!(world.living(id).unwrap().inventory().has_item(rock_id, true));
    assert!(world.items().iter().all(|i| i.id != rock_id));
    assert!(world.entities_at(Location::new(1, 0)).is_empty());

    // The cell it came from is walkable again
    assert!(turn_of(&mut world, id));
    assert!(world.perform(id, Action::Move(Location::new(1, 0))));
}

/// Test: Loot taken from a body is not handed back when the body respawns
#[test]
fn test_restart_keeps_looted_item_with_party() {
    let mut orc = monster("Orc", 4, Location::new(1, 0));
    let axe = Item::weapon("Axe", DiceRoll::new(1, 6, 0));
    let axe_id = axe.id;
    orc.inventory_mut().add_item(axe).unwrap();
    orc.inventory_mut().equip_item(axe_id);

    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .npc(orc)
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    world.damage(id, orc, 10);
    assert!(world.take_inventory_item(id, orc, axe_id));

    world.restart();
    let orc = world.living(orc).unwrap();
    assert!(orc.is_alive());
    assert!(!orc.inventory().has_item(axe_id, true));
    assert!(world.living(id).unwrap().inventory().has_item(axe_id, false));
}

/// Test: Descending levels up the survivors and replaces the level
#[test]
fn test_next_level_levels_up_party() {
    let mut world = TestWorld::new(4, 4)
        .player(fighter("Tank", 10))
        .tile(Location::new(1, 0), Tile::StairsDown)
        .generator(LevelGenerator {
            width: 9,
            height: 7,
            monsters: 2,
            loot: 1,
        })
        .start();
    let id = world.players()[0].id;
    let max_hp = world.living(id).unwrap().max_hp();
    assert!(turn_of(&mut world, id));
    let recorder = Recorder::attach(&mut world);

    assert!(world.perform(id, Action::Move(Location::new(1, 0))));
    let tank = world.living(id).unwrap();
    assert_eq!(tank.level(), 2);
    assert!(tank.max_hp() > max_hp);
    assert_eq!(tank.hp(), tank.max_hp());
    assert_eq!(world.depth(), 2);
    assert_eq!(world.level().width(), 9);
    assert_eq!(world.npcs().len(), 2);
    assert_eq!(world.items().len(), 1);
    assert_eq!(tank.location, world.level().spawn());
    assert_eq!(recorder.count(|e| matches!(e, GameEvent::NextLevel { .. })), 1);
}

/// Test: A built party starts fully equipped and can be saved
#[test]
fn test_built_party_round_trips() {
    let mut dice = Dice::seeded(77);
    let tank = build_from_descriptor("tank", 3, None, &mut dice).unwrap();
    assert!(tank.is_player());
    assert_eq!(tank.level(), 3);
    assert!(tank.inventory().equipped_items().count() >= 2);

    let json = serde_json::to_string(&tank).unwrap();
    let back: Living = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tank);

    let mut level = Level::new(4, 4);
    level.set_spawn(Location::new(3, 3));
    let mut world = World::new(level, dice);
    let id = world.add_player(back);
    world.start();
    assert_eq!(world.living(id).unwrap().location, Location::new(3, 3));
    assert!(world.is_alive(id));
}

/// Test: Unknown descriptors are reported, not guessed
#[test]
fn test_unknown_descriptor_fails() {
    let mut dice = Dice::seeded(1);
    assert!(build_from_descriptor("wizard", 1, None, &mut dice).is_err());
}
