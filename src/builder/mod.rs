//! Character building
//!
//! A build runs as an ordered pipeline of steps over one entity:
//! class, abilities, level (HP), the monster HP penalty when building an NPC,
//! then starting inventory. Each step draws from the caller's dice in a fixed
//! order so a seeded build is reproducible.

mod factory;

pub use factory::build_from_descriptor;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::Dice;
use crate::entity::{self, HasAbilityScores, HasInventory, Living, PlayerClass};
use crate::stats::{AbilityType, Modifier};

/// Fighter archetypes, each a priority order over the six core abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Bully,
    Tank,
    Nimble,
}

impl Archetype {
    /// Core abilities from most to least important
    pub fn priorities(&self) -> [AbilityType; 6] {
        use AbilityType::*;
        match self {
            Archetype::Bully => [Str, Con, Dex, Int, Cha, Wis],
            Archetype::Tank => [Con, Dex, Str, Int, Cha, Wis],
            Archetype::Nimble => [Dex, Str, Con, Int, Wis, Cha],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Bully => "bully",
            Archetype::Tank => "tank",
            Archetype::Nimble => "nimble",
        }
    }
}

/// A fighter build for one archetype at a target level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterBuilder {
    archetype: Archetype,
    level: u32,
    monster: bool,
}

impl CharacterBuilder {
    pub fn new(archetype: Archetype, level: u32) -> Self {
        Self {
            archetype,
            level,
            monster: false,
        }
    }

    /// Apply the monster HP penalty after the level step
    pub fn monster(mut self) -> Self {
        self.monster = true;
        self
    }

    /// Target level, never below 1
    pub fn level(&self) -> u32 {
        self.level.max(1)
    }

    /// Run every step of the pipeline over `entity`
    pub fn build(&self, dice: &mut Dice, mut living: Living) -> Living {
        self.build_class(&mut living);
        self.build_abilities(dice, &mut living);
        self.build_level(dice, &mut living);
        if self.monster {
            apply_monster_penalty(&mut living);
        }
        self.build_inventory(dice, &mut living);

        debug!(
            "built {} as {} (lvl {}, hp {})",
            living.name,
            self.archetype.name(),
            living.level(),
            living.max_hp()
        );
        living
    }

    fn build_class(&self, living: &mut Living) {
        living.set_player_class(PlayerClass::Fighter);
    }

    /// Six 4d6-drop-lowest rolls, largest to the highest priority
    fn build_abilities(&self, dice: &mut Dice, living: &mut Living) {
        let mut values: Vec<i32> = (0..6).map(|_| dice.ability_roll()).collect();
        values.sort_unstable();

        let mut scores = Modifier::new();
        for (kind, value) in self.archetype.priorities().iter().zip(values.iter().rev()) {
            scores.set_delta(*kind, *value);
        }

        living.base_modifiers_mut().clear();
        living.base_damage_mut().clear();
        let raw = living.raw_scores_mut();
        raw.clear();
        raw.add(scores);
    }

    /// One `1d10 + CON modifier` HP layer per level
    fn build_level(&self, dice: &mut Dice, living: &mut Living) {
        for _ in 0..self.level() {
            let con = living.ability_modifier(AbilityType::Con);
            let hp = dice.roll(1, 10, con);
            living.raw_scores_mut().add_delta(AbilityType::Hp, hp);
        }
        living.set_level(self.level());
    }

    /// Armor, a sword and sometimes a shield, all worn; plus gold
    fn build_inventory(&self, dice: &mut Dice, living: &mut Living) {
        let level = self.level();
        let inv = living.inventory_mut();
        inv.clear();

        let armor = entity::armor(dice, level);
        let sword = entity::sword();
        let shield = (dice.roll(1, 2, 0) == 1).then(|| entity::shield(dice, level));

        for item in [Some(armor), Some(sword), shield].into_iter().flatten() {
            let id = item.id;
            if inv.add_item(item).is_ok() {
                inv.equip_item(id);
            }
        }

        let gold = (5.0 * level as f64 * 0.3) as i64 + dice.roll(4, 6, 0) as i64;
        inv.set_gold(gold);

        living.reset_hp();
    }
}

/// Halve total HP through a compensating base layer
fn apply_monster_penalty(living: &mut Living) {
    let total = living.max_hp();
    living.base_modifiers_mut().add_delta(AbilityType::Hp, -(total / 2));
    living.reset_hp();
}
