//! Combat system module
//!
//! Implements the dice-driven parts of combat:
//! - Seeded dice and dice notation (e.g., "1d8", "4d6")
//! - Damage modifier kinds (melee, ranged, armor, shield)
//! - Base attack bonus table and attack sub-roll checks
//!
//! The attack sequence itself runs on the world, see `World::attack_entity`.

mod attack;
mod damage;
mod dice;

pub use attack::{AttackCheck, BaseAttackBonus};
pub use damage::DamageType;
pub use dice::{parse_dice, Dice, DiceRoll};
