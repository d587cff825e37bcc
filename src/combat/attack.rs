//! Attack sequence arithmetic
//!
//! The base attack bonus table decides how many sub-rolls an attack gets and
//! at which bonus each one is made. Levels 1-5 get one attack, 6-10 two,
//! 11-15 three and 16-20 four. Each later attack is 5 points weaker.

use serde::{Deserialize, Serialize};

/// Highest level covered by the attack table
pub const MAX_TABLE_LEVEL: u32 = 20;

/// Level-keyed base attack bonus table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseAttackBonus;

impl BaseAttackBonus {
    /// Number of attack sub-rolls for a character level (1-indexed)
    pub fn number_of_attacks(level: u32) -> u32 {
        let level = level.clamp(1, MAX_TABLE_LEVEL);
        (level - 1) / 5 + 1
    }

    /// Bonus for the given attack number (1-indexed) at a level
    pub fn bonus(level: u32, attack_number: u32) -> i32 {
        level as i32 - 5 * (attack_number.max(1) as i32 - 1)
    }

    /// The bonus of every sub-roll at a level, strongest first
    pub fn progression(level: u32) -> Vec<i32> {
        (1..=Self::number_of_attacks(level))
            .map(|n| Self::bonus(level, n))
            .collect()
    }
}

/// Outcome of one attack sub-roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackCheck {
    /// 1-indexed position in the attack sequence
    pub attack_number: u32,
    /// The d20 roll
    pub roll: i32,
    /// Base attack bonus for this sub-roll
    pub bonus: i32,
    /// Target's armor class at the time of the roll
    pub armor_class: i32,
}

impl AttackCheck {
    /// Total attack value (roll + bonus)
    pub fn total(&self) -> i32 {
        self.roll + self.bonus
    }

    /// Whether the sub-roll meets or beats the armor class
    pub fn hit(&self) -> bool {
        self.total() >= self.armor_class
    }
}
