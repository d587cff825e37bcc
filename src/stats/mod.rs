//! Stat aggregation primitives
//!
//! - Ability kinds (STR/DEX/CON/INT/WIS/CHA plus HP)
//! - Additive, independently removable modifier layers

mod ability;
mod modifier;

pub use ability::AbilityType;
pub use modifier::{LayerId, Modifier, ModifierSet};

/// Floor of the ability modifier formula
pub const MIN_ABILITY_MODIFIER: i32 = -5;

/// The ability modifier for a total score: `floor(score / 2) - 5`, never below -5
pub fn ability_modifier(score: i32) -> i32 {
    (score.div_euclid(2) - 5).max(MIN_ABILITY_MODIFIER)
}
