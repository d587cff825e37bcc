//! Descriptor-driven character creation
//!
//! A descriptor is free text matched by token, e.g. "tank", "npc bully".

use super::{Archetype, CharacterBuilder};
use crate::combat::Dice;
use crate::entity::{Living, Species};
use crate::error::BuildError;

/// Build a character from a descriptor.
///
/// Without an entity to rebuild, an "npc" descriptor rolls a species with
/// 1d3 (troll, orc, goblin) and anything else creates a player named after
/// the descriptor. The archetype is then picked by the first of "bully",
/// "nimble", "tank" present. An unmatched descriptor fails after any
/// species roll already happened.
pub fn build_from_descriptor(
    descriptor: &str,
    level: u32,
    entity: Option<Living>,
    dice: &mut Dice,
) -> Result<Living, BuildError> {
    let info = descriptor.to_lowercase();
    let is_npc = info.contains("npc");

    let entity = match entity {
        Some(e) => e,
        None if is_npc => Living::monster(roll_species(dice)),
        None => Living::player(player_name(&info)),
    };

    let archetype = if info.contains("bully") {
        Archetype::Bully
    } else if info.contains("nimble") {
        Archetype::Nimble
    } else if info.contains("tank") {
        Archetype::Tank
    } else {
        return Err(BuildError::UnknownDescriptor(descriptor.to_string()));
    };

    let mut builder = CharacterBuilder::new(archetype, level);
    if is_npc {
        builder = builder.monster();
    }
    Ok(builder.build(dice, entity))
}

fn roll_species(dice: &mut Dice) -> Species {
    match dice.roll(1, 3, 0) {
        1 => Species::Troll,
        2 => Species::Orc,
        _ => Species::Goblin,
    }
}

/// "tank" becomes "Tank"
fn player_name(info: &str) -> String {
    let mut chars = info.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Player".to_string(),
    }
}
