//! Movement scenario tests
//!
//! Tests passability, occupancy, doors and the down-stairs trait

use delve::entity::{Item, Location};
use delve::events::GameEvent;
use delve::level::Tile;
use delve::Action;

use crate::harness::{fighter, monster, turn_of, Recorder, TestWorld};

/// Test: A free floor tile accepts a step and announces it once
#[test]
fn test_move_onto_free_floor() {
    let mut world = TestWorld::new(5, 5).player(fighter("Tank", 10)).start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));
    let recorder = Recorder::attach(&mut world);

    assert!(world.perform(id, Action::Move(Location::new(1, 0))));
    assert_eq!(world.living(id).unwrap().location, Location::new(1, 0));
    assert_eq!(
        recorder.events(),
        vec![GameEvent::Moved {
            entity: world.living(id).unwrap().into(),
            to: Location::new(1, 0),
        }]
    );
}

/// Test: Living bodies, loose items, rock and the grid edge all refuse a step
#[test]
fn test_blocked_moves_change_nothing() {
    let mut world = TestWorld::new(5, 5)
        .spawn(Location::new(2, 2))
        .player(fighter("Tank", 10))
        .player(fighter("Nimble", 10))
        .item(Item::basic("Rock").at(Location::new(2, 3)))
        .tile(Location::new(3, 3), Tile::Rock)
        .start();
    let id = world.players()[0].id;
    let other = world.players()[1].location;
    assert!(turn_of(&mut world, id));
    let recorder = Recorder::attach(&mut world);

    let here = world.living(id).unwrap().location;
    for target in [other, Location::new(2, 3), Location::new(3, 3)] {
        assert!(!world.perform(id, Action::Move(target - here)), "{}", target);
    }
    assert_eq!(world.living(id).unwrap().location, here);
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN);
    assert!(recorder.events().is_empty());
}

/// Test: Dead bodies do not block
#[test]
fn test_dead_body_is_walkable() {
    let mut world = TestWorld::new(5, 5)
        .player(fighter("Tank", 10))
        .npc(monster("Orc", 4, Location::new(1, 1)))
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    world.damage(id, orc, 100);
    assert!(!world.is_alive(orc));

    assert!(turn_of(&mut world, id));
    assert!(world.perform(id, Action::Move(Location::new(1, 1))));
}

/// Test: Closed doors refuse entry until toggled open
#[test]
fn test_door_must_be_opened() {
    let mut world = TestWorld::new(5, 5)
        .player(fighter("Tank", 10))
        .tile(Location::new(1, 0), Tile::DoorClosed)
        .start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));

    assert!(!world.perform(id, Action::Move(Location::new(1, 0))));
    assert!(world.perform(id, Action::ToggleDoor(Location::new(1, 0))));
    assert_eq!(world.level().tile(Location::new(1, 0)), Some(Tile::DoorOpen));
    assert!(world.perform(id, Action::Move(Location::new(1, 0))));
    assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - 2);

    // Cannot close a door on yourself
    assert!(!world.toggle_door(id, Location::new(1, 0)));
}

/// Test: The down-stairs refuse the party while a monster lives
#[test]
fn test_stairs_wait_for_the_monsters() {
    let mut world = TestWorld::new(6, 6)
        .player(fighter("Tank", 10))
        .tile(Location::new(1, 1), Tile::StairsDown)
        .npc(monster("Orc", 4, Location::new(5, 5)))
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    assert!(turn_of(&mut world, id));

    assert!(!world.perform(id, Action::Move(Location::new(1, 1))));
    assert!(!world.accepts(orc, Location::new(1, 1)));

    world.damage(id, orc, 100);
    let recorder = Recorder::attach(&mut world);
    assert!(world.perform(id, Action::Move(Location::new(1, 1))));

    assert_eq!(world.depth(), 2);
    assert_eq!(
        recorder.count(|e| matches!(e, GameEvent::NextLevel { depth: 2 })),
        1
    );
}
