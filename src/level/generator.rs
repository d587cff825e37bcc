//! Random level generation

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{InitialEntity, Level, Tile};
use crate::builder::build_from_descriptor;
use crate::combat::Dice;
use crate::entity::{self, Item, Location, DEFAULT_POTION_TURNS};
use crate::stats::{AbilityType, Modifier};

/// Settings for generated levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGenerator {
    pub width: u32,
    pub height: u32,
    /// NPCs placed on each level
    pub monsters: u32,
    /// Loose items placed on each level
    pub loot: u32,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self {
            width: 16,
            height: 12,
            monsters: 4,
            loot: 2,
        }
    }
}

impl LevelGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Generate a level populated for the given dungeon depth
    pub fn generate(&self, dice: &mut Dice, depth: u32) -> Level {
        let mut level = self.layout(dice);
        let mut free = free_cells(&level);

        for _ in 0..self.monsters {
            let Some(loc) = take_cell(dice, &mut free) else {
                break;
            };
            let archetype = match dice.roll(1, 3, 0) {
                1 => "bully",
                2 => "nimble",
                _ => "tank",
            };
            match build_from_descriptor(&format!("npc {}", archetype), depth, None, dice) {
                Ok(npc) => level.add_initial(InitialEntity::Npc(npc.at(loc))),
                Err(e) => warn!("skipping monster: {}", e),
            }
        }

        for _ in 0..self.loot {
            let Some(loc) = take_cell(dice, &mut free) else {
                break;
            };
            let item = if dice.roll(1, 2, 0) == 1 {
                entity::trinket(dice, depth)
            } else {
                random_potion(dice)
            };
            level.add_initial(InitialEntity::Item(item.at(loc)));
        }

        level
    }

    /// Tiles, spawn point and down-stairs only
    pub fn layout(&self, dice: &mut Dice) -> Level {
        let (width, height) = (self.width as i32, self.height as i32);
        let mut level = Level::new(self.width, self.height);
        let mut spawn = None;
        let mut stairs = None;

        for x in 0..width {
            for y in 0..height {
                let loc = Location::new(x, y);
                let last = x == width - 1 && y == height - 1;

                let tile = if dice.roll(1, 5, 0) == 5 {
                    Tile::Rock
                } else if spawn.is_none() && (dice.roll(1, 20, 0) == 1 || last) {
                    spawn = Some(loc);
                    Tile::StairsUp
                } else if stairs.is_none() && (dice.roll(1, 20, 0) == 1 || last) {
                    stairs = Some(loc);
                    Tile::StairsDown
                } else {
                    Tile::Floor
                };
                level.set_tile(loc, tile);
            }
        }

        // The last cell may have rolled rock
        let spawn = spawn.unwrap_or(Location::new(width - 1, height - 1));
        level.set_tile(spawn, Tile::StairsUp);
        level.set_spawn(spawn);

        if stairs.is_none() {
            let fallback = level.locations().filter(|l| *l != spawn).last();
            if let Some(loc) = fallback {
                level.set_tile(loc, Tile::StairsDown);
            }
        }

        level
    }
}

/// Floor cells in row-major order
fn free_cells(level: &Level) -> Vec<Location> {
    level
        .locations()
        .filter(|l| level.tile(*l) == Some(Tile::Floor))
        .collect()
}

fn take_cell(dice: &mut Dice, free: &mut Vec<Location>) -> Option<Location> {
    if free.is_empty() {
        return None;
    }
    let index = dice.roll(1, free.len() as u32, -1) as usize;
    Some(free.swap_remove(index))
}

fn random_potion(dice: &mut Dice) -> Item {
    let kinds = AbilityType::all();
    let kind = kinds[dice.roll(1, kinds.len() as u32, -1) as usize];
    let strength = dice.roll(2, 6, 0);
    Item::potion(Modifier::single(kind, strength), DEFAULT_POTION_TURNS)
}
