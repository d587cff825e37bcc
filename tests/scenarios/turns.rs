//! Turn scenario tests
//!
//! Tests initiative, move budgets, NPC pacing and replay determinism

use delve::combat::Dice;
use delve::entity::Location;
use delve::events::GameEvent;
use delve::level::LevelGenerator;
use delve::{Action, Pacing, Runner, Step, World};

use crate::harness::{fighter, monster, turn_of, Recorder, TestWorld};

/// Test: Only the active entity may act, and only while it has moves
#[test]
fn test_actions_are_turn_gated() {
    let mut world = TestWorld::new(5, 5)
        .player(fighter("Tank", 10))
        .player(fighter("Nimble", 10))
        .start();
    let active = world.active_entity().unwrap();
    let idle = world
        .players()
        .iter()
        .map(|p| p.id)
        .find(|id| *id != active)
        .unwrap();
    assert!(matches!(world.run_step(), Step::AwaitingPlayer(id) if id == active));

    assert!(!world.perform(idle, Action::Wait));
    assert!(!world.perform(idle, Action::Move(Location::new(1, 1))));
    assert!(world.perform(active, Action::Wait));
    assert!(!world.perform(active, Action::Move(Location::new(1, 0))));
}

/// Test: Six single moves use up the budget and hand over the turn
#[test]
fn test_move_budget() {
    let mut world = TestWorld::new(10, 3).player(fighter("Tank", 10)).start();
    let id = world.players()[0].id;
    assert!(turn_of(&mut world, id));

    for step in 1..=delve::world::MOVES_PER_TURN {
        assert!(world.perform(id, Action::Move(Location::new(1, 0))));
        assert_eq!(world.moves_remaining(), delve::world::MOVES_PER_TURN - step);
    }
    assert!(!world.perform(id, Action::Move(Location::new(1, 0))));
    assert_eq!(world.run_step(), Step::Advanced);
    assert_eq!(world.turn_number(), 2);
}

/// Test: Dead entities roll no initiative and never become active
#[test]
fn test_dead_skip_initiative() {
    let mut world = TestWorld::new(6, 6)
        .player(fighter("Tank", 10))
        .npc(monster("Orc", 4, Location::new(5, 5)))
        .npc(monster("Goblin", 4, Location::new(5, 0)))
        .start();
    let id = world.players()[0].id;
    let orc = world.npcs()[0].id;
    world.damage(id, orc, 10);
    let recorder = Recorder::attach(&mut world);

    world.next_turn();
    let initiative: Vec<String> = recorder
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::DiceRolled {
                source: Some(source),
                label: Some(label),
                ..
            } if label == "Initiative" => Some(source.name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(initiative, vec!["Tank", "Goblin"]);

    for _ in 0..20 {
        assert_ne!(world.active_entity(), Some(orc));
        if let Step::AwaitingPlayer(p) = world.run_step() {
            world.perform(p, Action::Wait);
        }
    }
}

/// Test: An NPC turn reports thinking steps the driver can pace
#[test]
fn test_npc_turn_yields_thought_steps() {
    let mut world = TestWorld::new(8, 8)
        .player(fighter("Tank", 10))
        .npc(monster("Goblin", 4, Location::new(7, 7)))
        .start();
    let goblin = world.npcs()[0].id;
    let mut thoughts = 0;
    for _ in 0..40 {
        match world.run_step() {
            Step::Thought(id) => {
                assert_eq!(id, goblin);
                thoughts += 1;
            }
            Step::AwaitingPlayer(p) => {
                world.perform(p, Action::Wait);
            }
            _ => {}
        }
    }
    assert!(thoughts > 0);
}

fn replay(seed: u64) -> (Vec<String>, u64) {
    let mut dice = Dice::seeded(seed);
    let generator = LevelGenerator {
        width: 10,
        height: 8,
        monsters: 2,
        loot: 1,
    };
    let level = generator.generate(&mut dice, 1);
    let mut world = World::new(level, dice).with_generator(generator);
    world.add_player(fighter("Tank", 20));
    world.add_player(fighter("Nimble", 15));
    let recorder = Recorder::attach(&mut world);

    let mut runner = Runner::new(world, Pacing::NONE);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    rt.block_on(runner.run(15));
    (recorder.descriptions(), runner.world().dice().draws())
}

/// Test: A seed and a command sequence replay to the same rolls and events
#[test]
fn test_seeded_runs_replay_exactly() {
    let (first, first_draws) = replay(1234);
    let (second, second_draws) = replay(1234);
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first_draws, second_draws);
}
