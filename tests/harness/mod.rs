//! Scenario test harness
//!
//! - `TestWorld` - builder for a small seeded arena with no pacing
//! - `Recorder` - observer that keeps every event for later assertions
//! - `fighter` / `monster` - hand-rolled bodies with known HP

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use delve::combat::Dice;
use delve::entity::{EntityId, Item, Living, Location};
use delve::events::{Flow, GameEvent};
use delve::level::{InitialEntity, Level, LevelGenerator, Tile};
use delve::stats::{AbilityType, Modifier};
use delve::{Step, World};

pub const SEED: u64 = 42;

/// A player with flat 10 ability scores and `hp` hit points
pub fn fighter(name: &str, hp: i32) -> Living {
    let mut living = Living::player(name);
    living.raw_scores_mut().add(flat_scores(hp));
    living
}

/// An NPC with flat 10 ability scores and `hp` hit points
pub fn monster(name: &str, hp: i32, at: Location) -> Living {
    let mut living = Living::npc(name).at(at);
    living.raw_scores_mut().add(flat_scores(hp));
    living
}

fn flat_scores(hp: i32) -> Modifier<AbilityType> {
    AbilityType::CORE
        .iter()
        .fold(Modifier::single(AbilityType::Hp, hp), |m, kind| {
            m.with(*kind, 10)
        })
}

/// Builder for a seeded, all-floor test level
pub struct TestWorld {
    seed: u64,
    level: Level,
    players: Vec<Living>,
    generator: LevelGenerator,
}

impl TestWorld {
    pub fn new(width: u32, height: u32) -> Self {
        let mut level = Level::new(width, height);
        level.set_spawn(Location::new(0, 0));
        Self {
            seed: SEED,
            level,
            players: Vec::new(),
            generator: LevelGenerator {
                width: 8,
                height: 8,
                monsters: 0,
                loot: 0,
            },
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn spawn(mut self, at: Location) -> Self {
        self.level.set_spawn(at);
        self
    }

    pub fn tile(mut self, at: Location, tile: Tile) -> Self {
        self.level.set_tile(at, tile);
        self
    }

    pub fn npc(mut self, npc: Living) -> Self {
        self.level.add_initial(InitialEntity::Npc(npc));
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.level.add_initial(InitialEntity::Item(item));
        self
    }

    pub fn player(mut self, player: Living) -> Self {
        self.players.push(player);
        self
    }

    pub fn generator(mut self, generator: LevelGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The world, not yet started
    pub fn build(self) -> World {
        let mut world = World::new(self.level, Dice::seeded(self.seed)).with_generator(self.generator);
        for player in self.players {
            world.add_player(player);
        }
        world
    }

    pub fn start(self) -> World {
        let mut world = self.build();
        world.start();
        world
    }
}

/// Keeps a copy of every event the world emits
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl Recorder {
    pub fn attach(world: &mut World) -> Self {
        let recorder = Self::default();
        let sink = recorder.events.clone();
        world.subscribe(move |_: &mut World, event: &GameEvent| {
            sink.borrow_mut().push(event.clone());
            Flow::Keep
        });
        recorder
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Events other than dice rolls
    pub fn actions(&self) -> Vec<GameEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| !matches!(e, GameEvent::DiceRolled { .. }))
            .cloned()
            .collect()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.to_string()).collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Step the world until `id` is the active entity with a full move budget.
/// Other players pass their turn; NPCs think as usual.
pub fn turn_of(world: &mut World, id: EntityId) -> bool {
    for _ in 0..200 {
        if world.active_entity() == Some(id) && world.moves_remaining() == delve::world::MOVES_PER_TURN
        {
            return true;
        }
        match world.run_step() {
            Step::AwaitingPlayer(other) if other != id => {
                world.perform(other, delve::Action::Wait);
            }
            Step::AwaitingPlayer(_) => return true,
            Step::Idle => return false,
            _ => {}
        }
    }
    false
}
