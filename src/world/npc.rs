//! NPC decision routine
//!
//! One call makes one decision for the active NPC. Decisions go through
//! [`World::perform`] so they are turn-gated and charged like any other
//! command.

use super::{Action, World, MOVES_PER_TURN};
use crate::entity::{EntityId, Location};

pub(crate) fn think(world: &mut World, id: EntityId) {
    let Some(npc) = world.living(id).filter(|n| n.is_alive()) else {
        return;
    };
    let start = npc.location;

    // Close in on whoever hit us last
    if let Some(attacker) = npc.attacker() {
        let target = world
            .living(attacker)
            .filter(|a| a.is_alive())
            .map(|a| a.location);
        if let Some(target) = target {
            if start.distance_to(target) > 1 {
                let step = start.step_toward(target) - start;
                world.perform(id, Action::Move(step));
            }
        }
    }

    let Some(here) = world.living(id).map(|n| n.location) else {
        return;
    };
    let victim = world
        .players()
        .iter()
        .find(|p| p.id != id && p.is_alive() && p.location.distance_to(here) <= 1)
        .map(|p| p.id);
    if let Some(victim) = victim {
        if let Some(npc) = world.living_mut(id) {
            npc.remember_attacker(victim);
        }
        world.perform(id, Action::Attack(victim));
        return;
    }

    let keep_moving =
        world.moves_remaining() < MOVES_PER_TURN || world.dice_mut().roll(1, 2, 0) == 1;
    if !keep_moving {
        world.perform(id, Action::Wait);
        return;
    }

    if world.dice_mut().roll(1, 12, 0) == 1 {
        world.perform(id, Action::Wait);
        return;
    }
    let dx = world.dice_mut().roll(1, 3, 0) - 2;
    let dy = world.dice_mut().roll(1, 3, 0) - 2;
    world.perform(id, Action::Move(Location::new(dx, dy)));
}
