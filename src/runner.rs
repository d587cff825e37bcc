//! Headless driver
//!
//! The [`Runner`] polls [`World::run_step`], sleeps through the pauses the
//! world asks for and plays every party member with a simple autopilot. The
//! world itself never sleeps; all waiting happens here.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Pacing;
use crate::entity::{EntityId, HasInventory, HasLocation, ItemKind, Location};
use crate::level::Tile;
use crate::world::{Action, Step, World};

/// Where a headless run ended up. `turns` counts turns played across
/// resets and levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub turns: u32,
    pub depth: u32,
    pub party_alive: usize,
}

#[derive(Debug)]
pub struct Runner {
    world: World,
    pacing: Pacing,
    /// Turns begun during the current run
    turns: u32,
}

impl Runner {
    pub fn new(world: World, pacing: Pacing) -> Self {
        Self {
            world: world.with_reset_pause(pacing.reset()),
            pacing,
            turns: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Play until `max_turns` turns have passed or nobody is left to act.
    /// Turns are counted across resets and levels.
    pub async fn run(&mut self, max_turns: u32) -> RunSummary {
        self.world.start();
        let mut seen = self.world.turn_number();
        self.turns = 1;
        loop {
            let step = self.step();
            if self.world.turn_number() != seen {
                seen = self.world.turn_number();
                self.turns += 1;
            }
            if self.turns > max_turns {
                self.turns = max_turns;
                break;
            }
            match step {
                Step::Idle => break,
                Step::Pause(pause) => pace(pause).await,
                Step::Thought(_) => pace(self.pacing.think()).await,
                Step::Advanced | Step::AwaitingPlayer(_) => {}
            }
        }
        self.world.stop();

        let summary = self.summary();
        info!(
            "run ended after {} turns at depth {} with {} of {} alive",
            summary.turns,
            summary.depth,
            summary.party_alive,
            self.world.players().len()
        );
        summary
    }

    /// One world step. A player awaiting input is played by the autopilot.
    pub fn step(&mut self) -> Step {
        let step = self.world.run_step();
        if let Step::AwaitingPlayer(id) = step {
            let done = autopilot(&self.world, id)
                .into_iter()
                .any(|action| self.world.perform(id, action));
            if !done {
                self.world.perform(id, Action::Wait);
            }
        }
        step
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            turns: self.turns,
            depth: self.world.depth(),
            party_alive: self.world.players().iter().filter(|p| p.is_alive()).count(),
        }
    }
}

async fn pace(pause: Duration) {
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }
}

/// Candidate actions for a player, most wanted first.
///
/// Fight an adjacent monster, grab an adjacent item, use anything usable
/// that is carried, hunt the nearest monster, then head for the stairs.
pub fn autopilot(world: &World, id: EntityId) -> Vec<Action> {
    let Some(me) = world.living(id) else {
        return vec![Action::Wait];
    };
    let here = me.location();
    let mut actions = Vec::new();

    let living_npcs = || world.npcs().iter().filter(|n| n.is_alive());

    if let Some(target) = living_npcs().find(|n| n.location().is_adjacent(here)) {
        actions.push(Action::Attack(target.id));
    }

    if !me.inventory().is_full() {
        actions.extend(
            world
                .items()
                .iter()
                .filter(|i| i.location().is_adjacent(here))
                .map(|i| Action::PickUp(i.id)),
        );
    }

    actions.extend(
        me.inventory()
            .items()
            .iter()
            .filter(|i| !matches!(i.kind, ItemKind::Basic))
            .map(|i| Action::Use(i.id)),
    );

    let goal = living_npcs()
        .map(|n| n.location())
        .min_by_key(|at| at.distance_to(here))
        .or_else(|| world.level().find_tile(Tile::StairsDown));
    if let Some(goal) = goal {
        actions.extend(steps_toward(here, goal).into_iter().map(Action::Move));
    }

    debug!("{} considers {} actions", me.name, actions.len());
    actions
}

/// Offsets that bring `from` closer to `to`, the direct step first
fn steps_toward(from: Location, to: Location) -> Vec<Location> {
    let distance = from.distance_to(to);
    if distance == 0 {
        return Vec::new();
    }
    let direct = from.step_toward(to) - from;
    let mut steps = vec![direct];
    for dx in -1..=1 {
        for dy in -1..=1 {
            let delta = Location::new(dx, dy);
            if delta != direct
                && delta != Location::new(0, 0)
                && (from + delta).distance_to(to) < distance
            {
                steps.push(delta);
            }
        }
    }
    steps
}
